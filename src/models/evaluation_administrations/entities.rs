use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{BackofficeError, Result};

string_enum! {
    /// 评估周期状态
    AdministrationStatus, "评估周期状态", "../frontend/src/types/generated/evaluation_administration.ts" {
        Draft => "Draft",
        Pending => "Pending",
        Ongoing => "Ongoing",
        Closed => "Closed",
        Cancelled => "Cancelled",
    }
}

impl AdministrationStatus {
    /// 可生成评估：草稿或待发布
    pub fn can_generate(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    pub fn can_update(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    pub fn can_delete(self) -> bool {
        matches!(self, Self::Draft | Self::Cancelled)
    }

    pub fn is_final(self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// 发布：Pending → Ongoing
    pub fn publish(self) -> Result<Self> {
        match self {
            Self::Pending => Ok(Self::Ongoing),
            other => Err(BackofficeError::invalid_state(format!(
                "Cannot publish an evaluation administration in {other} status"
            ))),
        }
    }

    /// 关闭：Ongoing → Closed
    pub fn close(self) -> Result<Self> {
        match self {
            Self::Ongoing => Ok(Self::Closed),
            other => Err(BackofficeError::invalid_state(format!(
                "Cannot close an evaluation administration in {other} status"
            ))),
        }
    }

    /// 取消：Draft/Pending/Ongoing → Cancelled
    pub fn cancel(self) -> Result<Self> {
        match self {
            Self::Draft | Self::Pending | Self::Ongoing => Ok(Self::Cancelled),
            other => Err(BackofficeError::invalid_state(format!(
                "Cannot cancel an evaluation administration in {other} status"
            ))),
        }
    }
}

// 评估周期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation_administration.ts")]
pub struct EvaluationAdministration {
    pub id: i64,
    pub name: String,
    pub eval_period_start_date: NaiveDate,
    pub eval_period_end_date: NaiveDate,
    pub eval_schedule_start_date: NaiveDate,
    pub eval_schedule_end_date: NaiveDate,
    pub remarks: Option<String>,
    pub status: AdministrationStatus,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_transitions() {
        assert_eq!(
            AdministrationStatus::Pending.publish().unwrap(),
            AdministrationStatus::Ongoing
        );
        assert!(AdministrationStatus::Draft.publish().is_err());
        assert_eq!(
            AdministrationStatus::Ongoing.close().unwrap(),
            AdministrationStatus::Closed
        );
        assert!(AdministrationStatus::Pending.close().is_err());
        assert!(AdministrationStatus::Closed.cancel().is_err());
        assert_eq!(
            AdministrationStatus::Draft.cancel().unwrap(),
            AdministrationStatus::Cancelled
        );
    }

    #[test]
    fn test_guards() {
        assert!(AdministrationStatus::Pending.can_generate());
        assert!(!AdministrationStatus::Ongoing.can_generate());
        assert!(AdministrationStatus::Cancelled.can_delete());
        assert!(!AdministrationStatus::Ongoing.can_delete());
        assert!(!AdministrationStatus::Closed.can_update());
    }

    #[test]
    fn test_invalid_state_error_kind() {
        let err = AdministrationStatus::Closed.publish().unwrap_err();
        assert_eq!(err.error_type(), "Invalid State Error");
    }

    #[test]
    fn test_status_from_string() {
        assert_eq!(
            "Cancelled".parse::<AdministrationStatus>().unwrap(),
            AdministrationStatus::Cancelled
        );
        let status: AdministrationStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(status, AdministrationStatus::Pending);
        assert!(serde_json::from_str::<AdministrationStatus>("\"Open\"").is_err());
    }
}
