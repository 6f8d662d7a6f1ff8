use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares;
use crate::models::evaluation_administrations::requests::{
    AdministrationListParams, CreateAdministrationRequest, GenerateEvaluationsRequest,
    UpdateAdministrationRequest,
};
use crate::models::evaluation_results::requests::ResultListParams;
use crate::services::EvaluationAdministrationService;
use crate::utils::SafeIDI64;

static ADMINISTRATION_SERVICE: Lazy<EvaluationAdministrationService> =
    Lazy::new(EvaluationAdministrationService::new_lazy);

pub async fn list_administrations(
    req: HttpRequest,
    query: web::Query<AdministrationListParams>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .list_administrations(query.into_inner(), &req)
        .await
}

pub async fn get_administration(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.get_administration(id.0, &req).await
}

pub async fn create_administration(
    req: HttpRequest,
    body: web::Json<CreateAdministrationRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .create_administration(body.into_inner(), &req)
        .await
}

pub async fn update_administration(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAdministrationRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .update_administration(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_administration(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.delete_administration(id.0, &req).await
}

pub async fn generate_evaluations(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GenerateEvaluationsRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .generate_evaluations(id.0, body.into_inner(), &req)
        .await
}

pub async fn publish(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.publish(id.0, &req).await
}

pub async fn close(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.close(id.0, &req).await
}

pub async fn cancel(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.cancel(id.0, &req).await
}

pub async fn list_results(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ResultListParams>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .list_results(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_evaluation_administration_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluation-administrations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(admin_only())
                    .route("", web::get().to(list_administrations))
                    .route("", web::post().to(create_administration))
                    .route("/{id}", web::get().to(get_administration))
                    .route("/{id}", web::put().to(update_administration))
                    .route("/{id}", web::delete().to(delete_administration))
                    .route("/{id}/generate", web::post().to(generate_evaluations))
                    .route("/{id}/publish", web::post().to(publish))
                    .route("/{id}/close", web::post().to(close))
                    .route("/{id}/cancel", web::post().to(cancel))
                    .route("/{id}/results", web::get().to(list_results)),
            ),
    );
}
