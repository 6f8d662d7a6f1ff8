//! 评分条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub evaluation_id: i64,
    pub evaluation_template_content_id: i64,
    pub answer_option_id: Option<i64>,
    pub percentage: f64,
    pub rate: Option<f64>,
    pub score: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id",
        on_delete = "Cascade"
    )]
    Evaluation,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_rating(self) -> crate::models::evaluations::entities::EvaluationRating {
        crate::models::evaluations::entities::EvaluationRating {
            id: self.id,
            evaluation_administration_id: self.evaluation_administration_id,
            evaluation_id: self.evaluation_id,
            evaluation_template_content_id: self.evaluation_template_content_id,
            answer_option_id: self.answer_option_id,
            percentage: self.percentage,
            rate: self.rate,
            score: self.score,
        }
    }
}
