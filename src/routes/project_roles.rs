use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::forbid_non_admin;
use crate::middlewares;
use crate::models::project_roles::CreateProjectRoleRequest;
use crate::services::ProjectRoleService;

static PROJECT_ROLE_SERVICE: Lazy<ProjectRoleService> = Lazy::new(ProjectRoleService::new_lazy);

pub async fn list_project_roles(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROJECT_ROLE_SERVICE.list_project_roles(&req).await
}

pub async fn create_project_role(
    req: HttpRequest,
    body: web::Json<CreateProjectRoleRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_ROLE_SERVICE
        .create_project_role(body.into_inner(), &req)
        .await
}

pub fn configure_project_role_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/project-roles")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_project_roles))
            .route("", web::post().to(create_project_role)),
    );
}
