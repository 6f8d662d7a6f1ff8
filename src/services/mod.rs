//! 业务逻辑层
//!
//! 每个领域一个 `XxxService`，以 `Lazy` 静态实例挂在路由上，
//! 存储与缓存从应用数据中按请求取得。

pub mod answers;
pub mod auth;
pub mod evaluation_administrations;
pub mod evaluation_results;
pub mod evaluations;
pub mod project_roles;
pub mod projects;
pub mod templates;
pub mod users;

pub use answers::AnswerService;
pub use auth::AuthService;
pub use evaluation_administrations::EvaluationAdministrationService;
pub use evaluation_results::EvaluationResultService;
pub use evaluations::EvaluationService;
pub use project_roles::ProjectRoleService;
pub use projects::ProjectService;
pub use templates::TemplateService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::BackofficeError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| error::ErrorInternalServerError("Storage not found in app data"))
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| error::ErrorInternalServerError("Cache not found in app data"))
}

/// 业务错误转 HTTP 响应，内部错误只记录日志
pub(crate) fn error_response(err: &BackofficeError, code: ErrorCode) -> HttpResponse {
    if err.is_internal() {
        error!("{}", err.format_simple());
    }
    HttpResponse::build(err.status_code()).json(ApiResponse::from_error(err, code))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}
