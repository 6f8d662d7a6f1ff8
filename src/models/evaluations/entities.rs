use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{BackofficeError, Result};

/// 提交方式
pub const SUBMISSION_METHOD_MANUAL: &str = "Manual";

string_enum! {
    /// 评估任务状态
    EvaluationStatus, "评估状态", "../frontend/src/types/generated/evaluation.ts" {
        Draft => "Draft",
        Pending => "Pending",
        Open => "Open",
        Ongoing => "Ongoing",
        Submitted => "Submitted",
        Excluded => "Excluded",
        Removed => "Removed",
    }
}

impl EvaluationStatus {
    /// 尚未结束的状态
    pub const OUTSTANDING: &'static [EvaluationStatus] = &[
        EvaluationStatus::Draft,
        EvaluationStatus::Pending,
        EvaluationStatus::Open,
        EvaluationStatus::Ongoing,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted | Self::Excluded | Self::Removed)
    }

    pub fn is_outstanding(self) -> bool {
        !self.is_terminal()
    }

    /// 评估者是否可以作答、评论或提交
    pub fn accepts_answers(self) -> bool {
        matches!(self, Self::Open | Self::Ongoing)
    }

    /// 作答或评论后的状态（Open/Ongoing → Ongoing）
    pub fn answer(self) -> Result<Self> {
        if self.accepts_answers() {
            Ok(Self::Ongoing)
        } else {
            Err(BackofficeError::invalid_state(format!(
                "Evaluation is not open for answers (status: {self})"
            )))
        }
    }

    /// 切换 for_evaluation 标记后的状态
    pub fn toggle_for_evaluation(self, for_evaluation: bool) -> Result<Self> {
        match (for_evaluation, self) {
            (true, Self::Draft | Self::Excluded) => Ok(Self::Pending),
            (false, Self::Draft | Self::Pending) => Ok(Self::Excluded),
            (true, Self::Pending) | (false, Self::Excluded) => Ok(self),
            _ => Err(BackofficeError::invalid_state(format!(
                "Cannot change for_evaluation of an evaluation in {self} status"
            ))),
        }
    }

    /// 批准移除
    pub fn approve_removal(self) -> Result<Self> {
        if self.is_outstanding() {
            Ok(Self::Removed)
        } else {
            Err(BackofficeError::invalid_state(format!(
                "Cannot remove an evaluation in {self} status"
            )))
        }
    }

    /// 驳回移除
    pub fn decline_removal(self) -> Result<Self> {
        match self {
            Self::Removed => Ok(Self::Ongoing),
            other => Err(BackofficeError::invalid_state(format!(
                "Only removed evaluations can be restored (status: {other})"
            ))),
        }
    }
}

// 评估任务：评估者 × 被评估者 × 模板
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub evaluation_result_id: i64,
    pub evaluation_template_id: i64,
    pub evaluator_id: i64,
    pub evaluee_id: i64,
    pub project_id: Option<i64>,
    pub project_member_id: Option<i64>,
    pub for_evaluation: bool,
    pub eval_start_date: NaiveDate,
    pub eval_end_date: NaiveDate,
    pub percent_involvement: f64,
    pub comments: Option<String>,
    pub score: Option<f64>,
    pub weight: Option<f64>,
    pub weighted_score: Option<f64>,
    pub status: EvaluationStatus,
    pub submission_method: Option<String>,
    pub submitted_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 单条评分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationRating {
    pub id: i64,
    pub evaluation_administration_id: i64,
    pub evaluation_id: i64,
    pub evaluation_template_content_id: i64,
    pub answer_option_id: Option<i64>,
    pub percentage: f64,
    pub rate: Option<f64>,
    pub score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(EvaluationStatus::Submitted.is_terminal());
        assert!(EvaluationStatus::Excluded.is_terminal());
        assert!(EvaluationStatus::Removed.is_terminal());
        for s in EvaluationStatus::OUTSTANDING {
            assert!(s.is_outstanding());
        }
    }

    #[test]
    fn test_answer_guard() {
        assert_eq!(
            EvaluationStatus::Open.answer().unwrap(),
            EvaluationStatus::Ongoing
        );
        assert_eq!(
            EvaluationStatus::Ongoing.answer().unwrap(),
            EvaluationStatus::Ongoing
        );
        for s in [
            EvaluationStatus::Draft,
            EvaluationStatus::Pending,
            EvaluationStatus::Submitted,
            EvaluationStatus::Excluded,
            EvaluationStatus::Removed,
        ] {
            assert!(s.answer().is_err(), "{s} should reject answers");
        }
    }

    #[test]
    fn test_toggle_for_evaluation() {
        assert_eq!(
            EvaluationStatus::Draft.toggle_for_evaluation(true).unwrap(),
            EvaluationStatus::Pending
        );
        assert_eq!(
            EvaluationStatus::Excluded.toggle_for_evaluation(true).unwrap(),
            EvaluationStatus::Pending
        );
        assert_eq!(
            EvaluationStatus::Pending.toggle_for_evaluation(false).unwrap(),
            EvaluationStatus::Excluded
        );
        assert!(EvaluationStatus::Open.toggle_for_evaluation(false).is_err());
        assert!(EvaluationStatus::Submitted.toggle_for_evaluation(true).is_err());
    }

    #[test]
    fn test_removal_flow() {
        assert_eq!(
            EvaluationStatus::Open.approve_removal().unwrap(),
            EvaluationStatus::Removed
        );
        assert!(EvaluationStatus::Submitted.approve_removal().is_err());
        assert_eq!(
            EvaluationStatus::Removed.decline_removal().unwrap(),
            EvaluationStatus::Ongoing
        );
        assert!(EvaluationStatus::Ongoing.decline_removal().is_err());
    }

    #[test]
    fn test_status_from_string() {
        assert_eq!(
            "Ongoing".parse::<EvaluationStatus>().unwrap(),
            EvaluationStatus::Ongoing
        );
        assert!("ongoing".parse::<EvaluationStatus>().is_err());

        let status: EvaluationStatus = serde_json::from_str("\"Submitted\"").unwrap();
        assert_eq!(status, EvaluationStatus::Submitted);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Submitted\"");
        assert!(serde_json::from_str::<EvaluationStatus>("\"Closed\"").is_err());
    }
}
