use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationAdministrationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluation_results::{
        RESULTS_PER_PAGE,
        requests::{ResultListParams, ResultListQuery},
    },
};
use crate::services::{error_response, not_found};

pub async fn list_results(
    service: &EvaluationAdministrationService,
    id: i64,
    query: ResultListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_administration(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AdministrationNotFound,
                "Evaluation administration not found",
            ));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    let list_query = ResultListQuery {
        page: query.pagination.page(),
        size: RESULTS_PER_PAGE,
        status: query.status,
    };

    match storage.list_results(id, list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Evaluation results retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
