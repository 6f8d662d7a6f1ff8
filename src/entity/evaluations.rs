//! 评估任务实体

use sea_orm::entity::prelude::*;

use crate::models::evaluations::entities::{Evaluation, EvaluationStatus};
use crate::utils::date::{ts_to_date, ts_to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub evaluation_result_id: i64,
    pub evaluation_template_id: i64,
    pub evaluator_id: i64,
    pub evaluee_id: i64,
    pub project_id: Option<i64>,
    pub project_member_id: Option<i64>,
    pub for_evaluation: bool,
    pub eval_start_date: i64,
    pub eval_end_date: i64,
    pub percent_involvement: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub score: Option<f64>,
    pub weight: Option<f64>,
    pub weighted_score: Option<f64>,
    pub status: String,
    pub submission_method: Option<String>,
    pub submitted_date: Option<i64>,
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
    #[sea_orm(has_many = "super::evaluation_ratings::Entity")]
    Ratings,
}

impl Related<super::evaluation_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationResult.def()
    }
}

impl Related<super::evaluation_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn parsed_status(&self) -> EvaluationStatus {
        self.status.parse().unwrap_or(EvaluationStatus::Draft)
    }

    pub fn into_evaluation(self) -> Evaluation {
        let status = self.parsed_status();
        Evaluation {
            id: self.id,
            evaluation_administration_id: self.evaluation_administration_id,
            evaluation_result_id: self.evaluation_result_id,
            evaluation_template_id: self.evaluation_template_id,
            evaluator_id: self.evaluator_id,
            evaluee_id: self.evaluee_id,
            project_id: self.project_id,
            project_member_id: self.project_member_id,
            for_evaluation: self.for_evaluation,
            eval_start_date: ts_to_date(self.eval_start_date),
            eval_end_date: ts_to_date(self.eval_end_date),
            percent_involvement: self.percent_involvement,
            comments: self.comments,
            score: self.score,
            weight: self.weight,
            weighted_score: self.weighted_score,
            status,
            submission_method: self.submission_method,
            submitted_date: self.submitted_date.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
