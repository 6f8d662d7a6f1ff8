pub mod answers;
pub mod auth;
pub mod evaluation_administrations;
pub mod evaluation_results;
pub mod evaluations;
pub mod project_roles;
pub mod projects;
pub mod system;
pub mod templates;
pub mod users;

pub use answers::configure_answer_routes;
pub use auth::configure_auth_routes;
pub use evaluation_administrations::configure_evaluation_administration_routes;
pub use evaluation_results::configure_evaluation_result_routes;
pub use evaluations::configure_evaluation_routes;
pub use project_roles::configure_project_role_routes;
pub use projects::configure_project_routes;
pub use system::configure_system_routes;
pub use templates::configure_template_routes;
pub use users::configure_user_routes;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};

/// 仅管理员可访问的 scope/resource 中间件
pub(crate) fn admin_only() -> RequireRole {
    RequireRole::new_any(UserRole::admin_roles())
}

/// 同一路径按方法区分权限时，在处理函数内校验管理员
pub(crate) fn forbid_non_admin(req: &HttpRequest) -> Option<HttpResponse> {
    if RequireJWT::is_admin(req) {
        None
    } else {
        Some(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )))
    }
}
