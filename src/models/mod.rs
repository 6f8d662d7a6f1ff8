//! 数据模型定义
//!
//! 每个业务模块分为 entities（业务实体）、requests（请求参数）、responses（响应结构）。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 生成以字符串存储的枚举
///
/// 自动生成 Serialize/Deserialize、Display、FromStr 以及 `as_str()`。
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:tt, $ts_path:tt {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, ts_rs::TS)]
        #[ts(export, export_to = $ts_path)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", $label)),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(|_| {
                    serde::de::Error::custom(format!(
                        "无效的{}: '{s}'. 支持: {}",
                        $label,
                        [$($value),+].join(", ")
                    ))
                })
            }
        }
    };
}

pub mod auth;
pub mod common;
pub mod evaluation_administrations;
pub mod evaluation_results;
pub mod evaluation_templates;
pub mod evaluations;
pub mod answers;
pub mod project_roles;
pub mod projects;
pub mod users;

pub use common::*;

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    UserNameInvalid = 2001,
    UserEmailInvalid = 2002,
    UserPasswordInvalid = 2003,
    UserAlreadyExists = 2004,
    UserNotFound = 2005,
    CanNotDeleteCurrentUser = 2006,

    // 项目与参考数据
    ProjectNotFound = 3000,
    ProjectNameConflict = 3001,
    ProjectMemberNotFound = 3002,
    ProjectRoleNotFound = 3003,
    AnswerNotFound = 3004,
    AnswerOptionNotFound = 3005,
    TemplateNotFound = 3006,
    TemplateContentNotFound = 3007,

    // 评估流程
    AdministrationNotFound = 4000,
    AdministrationInvalidState = 4001,
    EvaluationNotFound = 4002,
    EvaluationInvalidState = 4003,
    EvaluationNotRater = 4004,
    EvaluationIncomplete = 4005,
    EvaluationResultNotFound = 4006,
    EvaluationValidationFailed = 4007,
}

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
