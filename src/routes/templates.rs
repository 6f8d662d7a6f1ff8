use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::forbid_non_admin;
use crate::middlewares;
use crate::models::evaluation_templates::requests::{
    CreateTemplateContentRequest, CreateTemplateRequest, TemplateListParams,
    UpdateTemplateRequest,
};
use crate::services::TemplateService;
use crate::utils::{SafeContentIdI64, SafeIDI64};

static TEMPLATE_SERVICE: Lazy<TemplateService> = Lazy::new(TemplateService::new_lazy);

pub async fn list_templates(
    req: HttpRequest,
    query: web::Query<TemplateListParams>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.list_templates(query.into_inner(), &req).await
}

pub async fn get_template(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.get_template(id.0, &req).await
}

pub async fn create_template(
    req: HttpRequest,
    body: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    TEMPLATE_SERVICE.create_template(body.into_inner(), &req).await
}

pub async fn update_template(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    TEMPLATE_SERVICE
        .update_template(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_template(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    TEMPLATE_SERVICE.delete_template(id.0, &req).await
}

pub async fn add_content(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateTemplateContentRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    TEMPLATE_SERVICE
        .add_content(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_content(
    req: HttpRequest,
    id: SafeIDI64,
    content_id: SafeContentIdI64,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    TEMPLATE_SERVICE
        .delete_content(id.0, content_id.0, &req)
        .await
}

pub fn configure_template_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluation-templates")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_templates))
            .route("", web::post().to(create_template))
            .route("/{id}", web::get().to(get_template))
            .route("/{id}", web::put().to(update_template))
            .route("/{id}", web::delete().to(delete_template))
            .route("/{id}/contents", web::post().to(add_content))
            .route("/{id}/contents/{content_id}", web::delete().to(delete_content)),
    );
}
