use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationResultService, result_code};
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn aggregate_result(
    service: &EvaluationResultService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.aggregate_result(id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Evaluation result aggregated successfully",
        ))),
        Err(e) => Ok(error_response(&e, result_code(&e))),
    }
}
