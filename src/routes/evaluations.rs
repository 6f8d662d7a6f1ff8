use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_only, forbid_non_admin};
use crate::middlewares;
use crate::models::evaluations::requests::{
    MyEvaluationListParams, SetForEvaluationRequest, SubmitAnswerRequest, SubmitCommentRequest,
};
use crate::services::EvaluationService;
use crate::utils::SafeIDI64;

static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 评估者
pub async fn list_my_evaluations(
    req: HttpRequest,
    query: web::Query<MyEvaluationListParams>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_my_evaluations(query.into_inner(), &req)
        .await
}

pub async fn get_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_evaluation(id.0, &req).await
}

pub async fn submit_answer(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_answer(id.0, body.into_inner(), &req)
        .await
}

pub async fn submit_comment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitCommentRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_comment(id.0, body.into_inner(), &req)
        .await
}

pub async fn submit_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.submit_evaluation(id.0, &req).await
}

// 管理员
pub async fn set_for_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SetForEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .set_for_evaluation(id.0, body.into_inner(), &req)
        .await
}

pub async fn approve(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.approve(id.0, &req).await
}

pub async fn decline(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.decline(id.0, &req).await
}

pub async fn delete_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    EVALUATION_SERVICE.delete_evaluation(id.0, &req).await
}

pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .route("/my", web::get().to(list_my_evaluations))
            .route("/{id}", web::get().to(get_evaluation))
            .route("/{id}", web::delete().to(delete_evaluation))
            .route("/{id}/answers", web::post().to(submit_answer))
            .route("/{id}/comment", web::put().to(submit_comment))
            .route("/{id}/submit", web::post().to(submit_evaluation))
            .service(
                web::resource("/{id}/for-evaluation")
                    .wrap(admin_only())
                    .route(web::put().to(set_for_evaluation)),
            )
            .service(
                web::resource("/{id}/approve")
                    .wrap(admin_only())
                    .route(web::post().to(approve)),
            )
            .service(
                web::resource("/{id}/decline")
                    .wrap(admin_only())
                    .route(web::post().to(decline)),
            ),
    );
}
