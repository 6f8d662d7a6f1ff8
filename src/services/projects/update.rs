use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use super::create::PROJECT_NAME_CONFLICT;
use crate::models::{ApiResponse, ErrorCode, projects::requests::UpdateProjectRequest};
use crate::services::{error_response, not_found};

pub async fn update_project(
    service: &ProjectService,
    project_id: i64,
    mut req: UpdateProjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(name) = req.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Project name is required",
            )));
        }
        match storage.get_project_by_name(name).await {
            Ok(Some(other)) if other.id != project_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNameConflict,
                    PROJECT_NAME_CONFLICT,
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
        }
    }

    match storage.update_project(project_id, req).await {
        Ok(Some(project)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(project, "Project updated successfully"))),
        Ok(None) => Ok(not_found(ErrorCode::ProjectNotFound, "Project not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
