//! 模板评分项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_template_contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_template_id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// 评分项占比
    pub rate: f64,
    pub sequence_no: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_templates::Entity",
        from = "Column::EvaluationTemplateId",
        to = "super::evaluation_templates::Column::Id",
        on_delete = "Cascade"
    )]
    Template,
}

impl Related<super::evaluation_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_content(self) -> crate::models::evaluation_templates::entities::EvaluationTemplateContent {
        crate::models::evaluation_templates::entities::EvaluationTemplateContent {
            id: self.id,
            evaluation_template_id: self.evaluation_template_id,
            name: self.name,
            description: self.description,
            rate: self.rate,
            sequence_no: self.sequence_no,
            is_active: self.is_active,
        }
    }
}
