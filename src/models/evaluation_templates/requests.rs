use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{BackofficeError, Result};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct TemplateListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub evaluee_role_id: Option<i64>,
    pub evaluator_role_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct TemplateListQuery {
    pub page: u64,
    pub size: u64,
    pub evaluee_role_id: Option<i64>,
    pub evaluator_role_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl TemplateListQuery {
    /// 缓存键，包含全部筛选参数
    pub fn cache_key(&self) -> String {
        format!(
            "templates:p{}:s{}:ee{}:er{}:a{}",
            self.page,
            self.size,
            self.evaluee_role_id.map(|v| v.to_string()).unwrap_or_default(),
            self.evaluator_role_id
                .map(|v| v.to_string())
                .unwrap_or_default(),
            self.is_active.map(|v| v.to_string()).unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct CreateTemplateContentRequest {
    pub name: String,
    pub description: Option<String>,
    pub rate: f64,
    #[serde(default)]
    pub sequence_no: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateTemplateContentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("Criterion name is required"));
        }
        if !self.rate.is_finite() || !(0.0..=100.0).contains(&self.rate) {
            return Err(BackofficeError::validation(
                "Criterion rate must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub display_name: String,
    pub evaluee_role_id: i64,
    pub evaluator_role_id: i64,
    pub rate: f64,
    pub answer_id: i64,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub contents: Vec<CreateTemplateContentRequest>,
}

impl CreateTemplateRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.display_name.trim().is_empty() {
            return Err(BackofficeError::validation(
                "Name and display name are required",
            ));
        }
        check_template_rate(self.rate)?;
        self.contents.iter().try_for_each(|c| c.validate())
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_template.ts")]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub evaluee_role_id: Option<i64>,
    pub evaluator_role_id: Option<i64>,
    pub rate: Option<f64>,
    pub answer_id: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateTemplateRequest {
    pub fn validate(&self) -> Result<()> {
        match self.rate {
            Some(rate) => check_template_rate(rate),
            None => Ok(()),
        }
    }
}

fn check_template_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(BackofficeError::validation(
            "Template rate must be a non-negative number",
        ));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_distinguishes_filters() {
        let base = TemplateListQuery {
            page: 1,
            size: 20,
            evaluee_role_id: None,
            evaluator_role_id: None,
            is_active: None,
        };
        let filtered = TemplateListQuery {
            is_active: Some(true),
            ..base.clone()
        };
        assert_ne!(base.cache_key(), filtered.cache_key());
    }

    #[test]
    fn test_content_rate_range() {
        let req: CreateTemplateContentRequest =
            serde_json::from_str(r#"{"name":"Quality","rate":150}"#).unwrap();
        assert!(req.is_active);
        assert!(req.validate().is_err());
    }
}
