use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::EvaluationAdministration;

// 生成评估的统计结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct GenerationSummary {
    pub results_created: usize,
    pub details_created: usize,
    pub evaluations_created: usize,
    pub hr_evaluations_created: usize,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct GenerateEvaluationsResponse {
    pub administration: EvaluationAdministration,
    pub summary: GenerationSummary,
}
