//! 统一错误处理模块
//!
//! 使用宏生成错误类型，每个变体带错误代码与类型名称，
//! 并提供到 HTTP 状态码的映射。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_backoffice_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum BackofficeError {
            $($variant(String),)*
        }

        impl BackofficeError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BackofficeError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BackofficeError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BackofficeError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl BackofficeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BackofficeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_backoffice_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    InvalidState("E013", "Invalid State Error"),
    Conflict("E014", "Conflict Error"),
}

impl BackofficeError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            BackofficeError::Validation(_)
            | BackofficeError::InvalidState(_)
            | BackofficeError::DateParse(_) => StatusCode::BAD_REQUEST,
            BackofficeError::Conflict(_) => StatusCode::CONFLICT,
            BackofficeError::NotFound(_) => StatusCode::NOT_FOUND,
            BackofficeError::Authorization(_) => StatusCode::FORBIDDEN,
            BackofficeError::Authentication(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为内部错误（不向客户端暴露详情）
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl fmt::Display for BackofficeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BackofficeError {}

impl From<sea_orm::DbErr> for BackofficeError {
    fn from(err: sea_orm::DbErr) -> Self {
        BackofficeError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BackofficeError {
    fn from(err: std::io::Error) -> Self {
        BackofficeError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BackofficeError {
    fn from(err: serde_json::Error) -> Self {
        BackofficeError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for BackofficeError {
    fn from(err: chrono::ParseError) -> Self {
        BackofficeError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BackofficeError::cache_connection("test").code(), "E001");
        assert_eq!(BackofficeError::database_config("test").code(), "E003");
        assert_eq!(BackofficeError::validation("test").code(), "E007");
        assert_eq!(BackofficeError::invalid_state("test").code(), "E013");
        assert_eq!(BackofficeError::conflict("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            BackofficeError::invalid_state("test").error_type(),
            "Invalid State Error"
        );
        assert_eq!(
            BackofficeError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BackofficeError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackofficeError::invalid_state("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackofficeError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            BackofficeError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackofficeError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            BackofficeError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert!(BackofficeError::database_operation("x").is_internal());
    }

    #[test]
    fn test_format_simple() {
        let err = BackofficeError::conflict("Project name should be unique");
        let formatted = err.format_simple();
        assert!(formatted.contains("Conflict Error"));
        assert!(formatted.contains("Project name should be unique"));
    }
}
