use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn delete_project(
    service: &ProjectService,
    project_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_project(project_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Project deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ProjectNotFound, "Project not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
