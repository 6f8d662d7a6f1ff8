use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TemplateService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn get_template(
    service: &TemplateService,
    template_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_template(template_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Template retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TemplateNotFound, "Template not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
