use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::ProjectStatus;
use crate::errors::{BackofficeError, Result};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct ProjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct CreateProjectRequest {
    pub name: String,
    pub client_name: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("Project name is required"));
        }
        check_date_order(self.start_date, self.end_date)
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct CreateProjectMemberRequest {
    pub employee_id: i64,
    pub project_role_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub allocation_rate: f64,
    pub remarks: Option<String>,
}

impl CreateProjectMemberRequest {
    pub fn validate(&self) -> Result<()> {
        check_allocation(self.allocation_rate)?;
        check_date_order(self.start_date, Some(self.end_date))
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct UpdateProjectMemberRequest {
    pub project_role_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub allocation_rate: Option<f64>,
    pub remarks: Option<String>,
}

impl UpdateProjectMemberRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.allocation_rate {
            check_allocation(rate)?;
        }
        if let Some(start) = self.start_date {
            check_date_order(start, self.end_date)?;
        }
        Ok(())
    }
}

fn check_allocation(rate: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&rate) {
        return Err(BackofficeError::validation(
            "Allocation rate must be between 0 and 100",
        ));
    }
    Ok(())
}

pub(crate) fn check_date_order(start: NaiveDate, end: Option<NaiveDate>) -> Result<()> {
    match end {
        Some(end) if end < start => Err(BackofficeError::validation(
            "End date must not be earlier than start date",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_member_allocation_bounds() {
        let mut req = CreateProjectMemberRequest {
            employee_id: 1,
            project_role_id: 1,
            start_date: date("2024-01-10"),
            end_date: date("2024-01-20"),
            allocation_rate: 80.0,
            remarks: None,
        };
        assert!(req.validate().is_ok());
        req.allocation_rate = 120.0;
        assert!(req.validate().is_err());
        req.allocation_rate = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_member_dates_order() {
        let req = CreateProjectMemberRequest {
            employee_id: 1,
            project_role_id: 1,
            start_date: date("2024-02-10"),
            end_date: date("2024-01-20"),
            allocation_rate: 50.0,
            remarks: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_project_name_required() {
        let req = CreateProjectRequest {
            name: "   ".to_string(),
            client_name: None,
            status: None,
            start_date: date("2024-01-01"),
            end_date: None,
            remarks: None,
        };
        assert!(req.validate().is_err());
    }
}
