use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::{ApiResponse, ErrorCode, projects::responses::ProjectDetailResponse};
use crate::services::{error_response, not_found};

pub async fn get_project(
    service: &ProjectService,
    project_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let project = match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return Ok(not_found(ErrorCode::ProjectNotFound, "Project not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    };

    match storage.list_project_members(project_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProjectDetailResponse { project, members },
            "Project retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
