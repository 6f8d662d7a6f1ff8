use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::BackofficeError;
use crate::models::ErrorCode;

/// 内部错误对外统一提示
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 由业务错误构造响应体，内部错误不暴露详情
    pub fn from_error(err: &BackofficeError, code: ErrorCode) -> Self {
        if err.is_internal() {
            Self::error_empty(ErrorCode::InternalServerError, INTERNAL_ERROR_MESSAGE)
        } else {
            Self::error_empty(code, err.message())
        }
    }
}

impl ErrorCode {
    /// 业务错误的默认错误码
    pub fn for_error(err: &BackofficeError) -> Self {
        match err {
            BackofficeError::Validation(_) | BackofficeError::DateParse(_) => {
                ErrorCode::BadRequest
            }
            BackofficeError::InvalidState(_) => ErrorCode::BadRequest,
            BackofficeError::Conflict(_) => ErrorCode::Conflict,
            BackofficeError::NotFound(_) => ErrorCode::NotFound,
            BackofficeError::Authorization(_) => ErrorCode::Forbidden,
            BackofficeError::Authentication(_) => ErrorCode::Unauthorized,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_hides_details() {
        let err = BackofficeError::database_operation("UNIQUE constraint failed: users.email");
        let body = ApiResponse::from_error(&err, ErrorCode::for_error(&err));
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert_eq!(body.code, ErrorCode::InternalServerError as i32);
    }

    #[test]
    fn test_client_error_keeps_message() {
        let err = BackofficeError::validation("Must have at least 1 employee selected");
        let body = ApiResponse::from_error(&err, ErrorCode::for_error(&err));
        assert_eq!(body.message, "Must have at least 1 employee selected");
        assert_eq!(body.code, ErrorCode::BadRequest as i32);
    }
}
