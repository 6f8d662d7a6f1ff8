use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AdministrationStatus;
use crate::errors::{BackofficeError, Result};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct AdministrationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AdministrationStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdministrationListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<AdministrationStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct CreateAdministrationRequest {
    pub name: String,
    pub eval_period_start_date: NaiveDate,
    pub eval_period_end_date: NaiveDate,
    pub eval_schedule_start_date: NaiveDate,
    pub eval_schedule_end_date: NaiveDate,
    pub remarks: Option<String>,
}

impl CreateAdministrationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("Name is required"));
        }
        check_window(
            self.eval_period_start_date,
            self.eval_period_end_date,
            "Evaluation period",
        )?;
        check_window(
            self.eval_schedule_start_date,
            self.eval_schedule_end_date,
            "Evaluation schedule",
        )
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct UpdateAdministrationRequest {
    pub name: Option<String>,
    pub eval_period_start_date: Option<NaiveDate>,
    pub eval_period_end_date: Option<NaiveDate>,
    pub eval_schedule_start_date: Option<NaiveDate>,
    pub eval_schedule_end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl UpdateAdministrationRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(BackofficeError::validation("Name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct GenerateEvaluationsRequest {
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

pub(crate) fn check_window(start: NaiveDate, end: NaiveDate, label: &str) -> Result<()> {
    if start > end {
        return Err(BackofficeError::validation(format!(
            "{label} start date must not be later than its end date"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let mut req: CreateAdministrationRequest = serde_json::from_str(
            r#"{
                "name": "2024 H1",
                "evalPeriodStartDate": "2024-01-01",
                "evalPeriodEndDate": "2024-06-30",
                "evalScheduleStartDate": "2024-07-01",
                "evalScheduleEndDate": "2024-07-15"
            }"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        req.eval_schedule_end_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(req.validate().is_err());
    }
}
