use serde::Serialize;
use ts_rs::TS;

use super::entities::{EvaluationTemplate, EvaluationTemplateContent};

// 模板详情（含条目）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct TemplateDetailResponse {
    pub template: EvaluationTemplate,
    pub contents: Vec<EvaluationTemplateContent>,
}
