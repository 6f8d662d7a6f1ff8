//! 结果明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_result_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_result_id: i64,
    pub evaluation_template_id: i64,
    pub weight: f64,
    pub score: Option<f64>,
    pub weighted_score: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_results::Entity",
        from = "Column::EvaluationResultId",
        to = "super::evaluation_results::Column::Id",
        on_delete = "Cascade"
    )]
    EvaluationResult,
}

impl Related<super::evaluation_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_detail(self) -> crate::models::evaluation_results::entities::EvaluationResultDetail {
        crate::models::evaluation_results::entities::EvaluationResultDetail {
            id: self.id,
            evaluation_result_id: self.evaluation_result_id,
            evaluation_template_id: self.evaluation_template_id,
            weight: self.weight,
            score: self.score,
            weighted_score: self.weighted_score,
        }
    }
}
