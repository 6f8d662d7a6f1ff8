use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::{ApiResponse, ErrorCode, projects::requests::CreateProjectRequest};
use crate::services::error_response;

pub(crate) const PROJECT_NAME_CONFLICT: &str = "Project name should be unique";

pub async fn create_project(
    service: &ProjectService,
    req: CreateProjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;

    match storage.get_project_by_name(req.name.trim()).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ProjectNameConflict,
                PROJECT_NAME_CONFLICT,
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    match storage.create_project(req).await {
        Ok(project) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(project, "Project created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
