use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TemplateService, check_references};
use crate::models::{
    ApiResponse, ErrorCode, evaluation_templates::requests::CreateTemplateRequest,
};
use crate::services::error_response;

pub async fn create_template(
    service: &TemplateService,
    req: CreateTemplateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    if let Err(e) = check_references(
        &storage,
        &[req.evaluee_role_id, req.evaluator_role_id],
        Some(req.answer_id),
    )
    .await
    {
        return Ok(error_response(&e, ErrorCode::for_error(&e)));
    }

    match storage.create_template(req).await {
        Ok(detail) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(detail, "Template created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
