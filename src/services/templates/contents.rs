use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TemplateService;
use crate::models::{
    ApiResponse, ErrorCode, evaluation_templates::requests::CreateTemplateContentRequest,
};
use crate::services::{error_response, not_found};

pub async fn add_content(
    service: &TemplateService,
    template_id: i64,
    req: CreateTemplateContentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    match storage.get_template(template_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::TemplateNotFound, "Template not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    match storage.add_template_content(template_id, req).await {
        Ok(content) => Ok(HttpResponse::Created().json(ApiResponse::success(
            content,
            "Template content created successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn delete_content(
    service: &TemplateService,
    template_id: i64,
    content_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_template_content(template_id, content_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Template content deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::TemplateContentNotFound,
            "Template content not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
