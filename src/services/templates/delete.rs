use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TemplateService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn delete_template(
    service: &TemplateService,
    template_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_template(template_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Template deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TemplateNotFound, "Template not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
