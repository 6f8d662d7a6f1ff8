use serde::Deserialize;
use ts_rs::TS;

use super::entities::EvaluationStatus;
use crate::models::common::PaginationQuery;

// 当前评估者的评估列表参数
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct MyEvaluationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub evaluation_administration_id: Option<i64>,
    pub status: Option<EvaluationStatus>,
}

#[derive(Debug, Clone)]
pub struct EvaluationListQuery {
    pub page: u64,
    pub size: u64,
    pub evaluator_id: Option<i64>,
    pub evaluation_result_id: Option<i64>,
    pub evaluation_administration_id: Option<i64>,
    pub status: Option<EvaluationStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitAnswerRequest {
    pub evaluation_rating_id: i64,
    pub answer_option_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitCommentRequest {
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SetForEvaluationRequest {
    pub for_evaluation: bool,
}
