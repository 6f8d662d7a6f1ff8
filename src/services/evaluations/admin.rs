//! 管理员操作：纳入/排除、批准或驳回移除、删除

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, evaluation_code};
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{entities::Evaluation, requests::SetForEvaluationRequest},
};
use crate::services::{error_response, not_found};

fn respond(result: Result<Evaluation>, message: &str) -> HttpResponse {
    match result {
        Ok(evaluation) => HttpResponse::Ok().json(ApiResponse::success(evaluation, message)),
        Err(e) => error_response(&e, evaluation_code(&e)),
    }
}

pub async fn set_for_evaluation(
    service: &EvaluationService,
    id: i64,
    req: SetForEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(
        storage.set_for_evaluation(id, req.for_evaluation).await,
        "Evaluation updated successfully",
    ))
}

pub async fn approve(
    service: &EvaluationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(
        storage.approve_evaluation(id).await,
        "Evaluation removal approved",
    ))
}

pub async fn decline(
    service: &EvaluationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(
        storage.decline_evaluation(id).await,
        "Evaluation removal declined",
    ))
}

pub async fn delete_evaluation(
    service: &EvaluationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_evaluation(id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Evaluation deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::EvaluationNotFound, "Evaluation not found")),
        Err(e) => Ok(error_response(&e, evaluation_code(&e))),
    }
}
