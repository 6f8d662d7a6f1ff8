//! 评估结果实体

use sea_orm::entity::prelude::*;

use crate::models::evaluation_results::entities::{EvaluationResult, ResultStatus};
use crate::utils::date::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub employee_id: i64,
    pub score: Option<f64>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_administrations::Entity",
        from = "Column::EvaluationAdministrationId",
        to = "super::evaluation_administrations::Column::Id",
        on_delete = "Cascade"
    )]
    Administration,
    #[sea_orm(has_many = "super::evaluation_result_details::Entity")]
    Details,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::evaluation_administrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Administration.def()
    }
}

impl Related<super::evaluation_result_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> EvaluationResult {
        EvaluationResult {
            id: self.id,
            evaluation_administration_id: self.evaluation_administration_id,
            employee_id: self.employee_id,
            score: self.score,
            status: self.status.parse().unwrap_or(ResultStatus::ForReview),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
