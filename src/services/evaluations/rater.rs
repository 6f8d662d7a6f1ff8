//! 评估者操作：作答、评语、提交

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationService, evaluation_code};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    evaluations::requests::{SubmitAnswerRequest, SubmitCommentRequest},
};
use crate::services::{error_response, unauthorized};

pub async fn submit_answer(
    service: &EvaluationService,
    id: i64,
    req: SubmitAnswerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    match storage.submit_answer(id, user_id, req).await {
        Ok(rating) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            rating,
            "Answer submitted successfully",
        ))),
        Err(e) => Ok(error_response(&e, evaluation_code(&e))),
    }
}

pub async fn submit_comment(
    service: &EvaluationService,
    id: i64,
    req: SubmitCommentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    match storage.submit_comment(id, user_id, req.comment).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Comment submitted successfully",
        ))),
        Err(e) => Ok(error_response(&e, evaluation_code(&e))),
    }
}

pub async fn submit_evaluation(
    service: &EvaluationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    match storage.submit_evaluation(id, user_id).await {
        Ok(evaluation) => {
            info!(
                "Evaluation {} submitted by user {} with score {:?}",
                id, user_id, evaluation.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                evaluation,
                "Evaluation submitted successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, evaluation_code(&e))),
    }
}
