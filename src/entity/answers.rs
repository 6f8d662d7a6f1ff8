//! 答案量表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::answer_options::Entity")]
    AnswerOptions,
}

impl Related<super::answer_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_answer(self) -> crate::models::answers::Answer {
        crate::models::answers::Answer {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}
