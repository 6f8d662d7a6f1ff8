use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评估模板：哪个评估者角色评哪个被评估者角色，以及该组合的权重
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct EvaluationTemplate {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub evaluee_role_id: i64,
    pub evaluator_role_id: i64,
    /// 结果明细权重的来源
    pub rate: f64,
    /// 评分使用的答案量表
    pub answer_id: i64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 模板条目（评分标准）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct EvaluationTemplateContent {
    pub id: i64,
    pub evaluation_template_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 该条目所占百分比
    pub rate: f64,
    pub sequence_no: i32,
    pub is_active: bool,
}
