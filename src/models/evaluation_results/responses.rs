use serde::Serialize;
use ts_rs::TS;

use super::entities::{EvaluationResult, EvaluationResultDetail};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_result.ts")]
pub struct ResultDetailResponse {
    pub result: EvaluationResult,
    pub details: Vec<EvaluationResultDetail>,
}
