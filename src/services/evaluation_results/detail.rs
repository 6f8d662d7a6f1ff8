use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationResultService, result_code};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

fn result_not_found() -> HttpResponse {
    not_found(
        ErrorCode::EvaluationResultNotFound,
        "Evaluation result not found",
    )
}

pub async fn get_result(
    service: &EvaluationResultService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_result_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Evaluation result retrieved successfully",
        ))),
        Ok(None) => Ok(result_not_found()),
        Err(e) => Ok(error_response(&e, result_code(&e))),
    }
}

/// 删除结果，连带其明细、评估与评分
pub async fn delete_result(
    service: &EvaluationResultService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_result(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Evaluation result deleted successfully",
        ))),
        Ok(false) => Ok(result_not_found()),
        Err(e) => Ok(error_response(&e, result_code(&e))),
    }
}
