use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectRoleService;
use crate::models::{ApiResponse, ErrorCode, project_roles::CreateProjectRoleRequest};
use crate::services::error_response;

pub async fn create_project_role(
    service: &ProjectRoleService,
    req: CreateProjectRoleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    match storage.create_project_role(req).await {
        Ok(role) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(role, "Project role created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
