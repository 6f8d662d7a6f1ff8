//! 答案量表与选项

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{BackofficeError, Result};

// 答案量表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/answer.ts")]
pub struct Answer {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

// 答案选项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/answer.ts")]
pub struct AnswerOption {
    pub id: i64,
    pub answer_id: i64,
    pub name: String,
    pub display_name: String,
    pub rate: f64,
    pub sequence_no: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/answer.ts")]
pub struct CreateAnswerRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateAnswerRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("Name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/answer.ts")]
pub struct CreateAnswerOptionRequest {
    pub name: String,
    pub display_name: String,
    pub rate: f64,
    #[serde(default)]
    pub sequence_no: i32,
    pub description: Option<String>,
}

impl CreateAnswerOptionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.display_name.trim().is_empty() {
            return Err(BackofficeError::validation(
                "Name and display name are required",
            ));
        }
        check_rate(self.rate)
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/answer.ts")]
pub struct UpdateAnswerOptionRequest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub rate: Option<f64>,
    pub sequence_no: Option<i32>,
    pub description: Option<String>,
}

impl UpdateAnswerOptionRequest {
    pub fn validate(&self) -> Result<()> {
        match self.rate {
            Some(rate) => check_rate(rate),
            None => Ok(()),
        }
    }
}

fn check_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(BackofficeError::validation(
            "Rate must be a non-negative number",
        ));
    }
    Ok(())
}
