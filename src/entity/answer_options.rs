//! 答案选项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answer_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub answer_id: i64,
    pub name: String,
    pub display_name: String,
    pub rate: f64,
    pub sequence_no: i32,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::answers::Entity",
        from = "Column::AnswerId",
        to = "super::answers::Column::Id",
        on_delete = "Cascade"
    )]
    Answer,
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_answer_option(self) -> crate::models::answers::AnswerOption {
        crate::models::answers::AnswerOption {
            id: self.id,
            answer_id: self.answer_id,
            name: self.name,
            display_name: self.display_name,
            rate: self.rate,
            sequence_no: self.sequence_no,
            description: self.description,
        }
    }
}
