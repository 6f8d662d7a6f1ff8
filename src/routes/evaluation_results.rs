use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares;
use crate::models::PaginationQuery;
use crate::services::{EvaluationResultService, EvaluationService};
use crate::utils::SafeIDI64;

static RESULT_SERVICE: Lazy<EvaluationResultService> =
    Lazy::new(EvaluationResultService::new_lazy);
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

pub async fn get_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(id.0, &req).await
}

pub async fn delete_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_result(id.0, &req).await
}

pub async fn aggregate_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.aggregate_result(id.0, &req).await
}

pub async fn list_result_evaluations(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_result_evaluations(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_evaluation_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluation-results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(admin_only())
                    .route("/{id}", web::get().to(get_result))
                    .route("/{id}", web::delete().to(delete_result))
                    .route("/{id}/aggregate", web::post().to(aggregate_result))
                    .route("/{id}/evaluations", web::get().to(list_result_evaluations)),
            ),
    );
}
