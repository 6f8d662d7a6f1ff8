//! 评估模板实体

use sea_orm::entity::prelude::*;

use crate::models::evaluation_templates::entities::EvaluationTemplate;
use crate::utils::date::ts_to_datetime;
use crate::utils::evaluation_plan::TemplateInput;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub evaluee_role_id: i64,
    pub evaluator_role_id: i64,
    pub rate: f64,
    pub answer_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluation_template_contents::Entity")]
    Contents,
}

impl Related<super::evaluation_template_contents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_template(self) -> EvaluationTemplate {
        EvaluationTemplate {
            id: self.id,
            name: self.name,
            display_name: self.display_name,
            evaluee_role_id: self.evaluee_role_id,
            evaluator_role_id: self.evaluator_role_id,
            rate: self.rate,
            answer_id: self.answer_id,
            description: self.description,
            is_active: self.is_active,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }

    pub fn to_template_input(&self) -> TemplateInput {
        TemplateInput {
            id: self.id,
            evaluee_role_id: self.evaluee_role_id,
            evaluator_role_id: self.evaluator_role_id,
            rate: self.rate,
        }
    }
}
