use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TemplateService, check_references};
use crate::models::{
    ApiResponse, ErrorCode, evaluation_templates::requests::UpdateTemplateRequest,
};
use crate::services::{error_response, not_found};

pub async fn update_template(
    service: &TemplateService,
    template_id: i64,
    req: UpdateTemplateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    let role_ids: Vec<i64> = [req.evaluee_role_id, req.evaluator_role_id]
        .into_iter()
        .flatten()
        .collect();
    if let Err(e) = check_references(&storage, &role_ids, req.answer_id).await {
        return Ok(error_response(&e, ErrorCode::for_error(&e)));
    }

    match storage.update_template(template_id, req).await {
        Ok(Some(template)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            template,
            "Template updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TemplateNotFound, "Template not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
