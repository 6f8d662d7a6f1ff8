use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 评估结果状态
    ResultStatus, "评估结果状态", "../frontend/src/types/generated/evaluation_result.ts" {
        ForReview => "ForReview",
        Ongoing => "Ongoing",
        Completed => "Completed",
    }
}

// 员工在某个周期内的最终结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_result.ts")]
pub struct EvaluationResult {
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub employee_id: i64,
    pub score: Option<f64>,
    pub status: ResultStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 结果明细：按模板归集评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_result.ts")]
pub struct EvaluationResultDetail {
    pub id: i64,
    pub evaluation_result_id: i64,
    pub evaluation_template_id: i64,
    pub weight: f64,
    pub score: Option<f64>,
    pub weighted_score: Option<f64>,
}
