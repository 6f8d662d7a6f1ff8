use serde::Serialize;
use ts_rs::TS;

use super::entities::{Evaluation, EvaluationRating};
use crate::models::answers::AnswerOption;
use crate::models::evaluation_templates::entities::EvaluationTemplateContent;

// 评估详情：评分条目与可选答案
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetailResponse {
    pub evaluation: Evaluation,
    pub ratings: Vec<EvaluationRating>,
    pub criteria: Vec<EvaluationTemplateContent>,
    pub answer_options: Vec<AnswerOption>,
}
