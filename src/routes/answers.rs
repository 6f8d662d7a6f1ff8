use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::forbid_non_admin;
use crate::middlewares;
use crate::models::answers::{
    CreateAnswerOptionRequest, CreateAnswerRequest, UpdateAnswerOptionRequest,
};
use crate::services::AnswerService;
use crate::utils::{SafeIDI64, SafeOptionIdI64};

static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

pub async fn list_answers(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.list_answers(&req).await
}

pub async fn create_answer(
    req: HttpRequest,
    body: web::Json<CreateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    ANSWER_SERVICE.create_answer(body.into_inner(), &req).await
}

pub async fn list_options(req: HttpRequest, answer_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.list_options(answer_id.0, &req).await
}

pub async fn create_option(
    req: HttpRequest,
    answer_id: SafeIDI64,
    body: web::Json<CreateAnswerOptionRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    ANSWER_SERVICE
        .create_option(answer_id.0, body.into_inner(), &req)
        .await
}

pub async fn update_option(
    req: HttpRequest,
    answer_id: SafeIDI64,
    option_id: SafeOptionIdI64,
    body: web::Json<UpdateAnswerOptionRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    ANSWER_SERVICE
        .update_option(answer_id.0, option_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_option(
    req: HttpRequest,
    answer_id: SafeIDI64,
    option_id: SafeOptionIdI64,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    ANSWER_SERVICE
        .delete_option(answer_id.0, option_id.0, &req)
        .await
}

pub fn configure_answer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/answers")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_answers))
            .route("", web::post().to(create_answer))
            .route("/{id}/options", web::get().to(list_options))
            .route("/{id}/options", web::post().to(create_option))
            .route("/{id}/options/{option_id}", web::put().to(update_option))
            .route("/{id}/options/{option_id}", web::delete().to(delete_option)),
    );
}
