use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    evaluations::{
        EVALUATIONS_PER_PAGE,
        requests::{EvaluationListQuery, MyEvaluationListParams},
    },
};
use crate::services::{error_response, not_found, unauthorized};

pub async fn list_my_evaluations(
    service: &EvaluationService,
    query: MyEvaluationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    let list_query = EvaluationListQuery {
        page: query.pagination.page(),
        size: EVALUATIONS_PER_PAGE,
        evaluator_id: Some(user_id),
        evaluation_result_id: None,
        evaluation_administration_id: query.evaluation_administration_id,
        status: query.status,
    };

    match storage.list_evaluations(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn list_result_evaluations(
    service: &EvaluationService,
    result_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = EvaluationListQuery {
        page: query.page(),
        size: EVALUATIONS_PER_PAGE,
        evaluator_id: None,
        evaluation_result_id: Some(result_id),
        evaluation_administration_id: None,
        status: None,
    };

    match storage.list_evaluations(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

/// 评估详情，仅评估者本人或管理员可见
pub async fn get_evaluation(
    service: &EvaluationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    match storage.get_evaluation_detail(id).await {
        Ok(Some(detail)) => {
            if detail.evaluation.evaluator_id != user_id && !RequireJWT::is_admin(request) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationNotRater,
                    "You are not the evaluator of this evaluation",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Evaluation retrieved successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::EvaluationNotFound, "Evaluation not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
