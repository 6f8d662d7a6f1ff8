use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::forbid_non_admin;
use crate::middlewares;
use crate::models::projects::requests::{
    CreateProjectMemberRequest, CreateProjectRequest, ProjectListParams,
    UpdateProjectMemberRequest, UpdateProjectRequest,
};
use crate::services::ProjectService;
use crate::utils::{SafeIDI64, SafeMemberIdI64};

static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

pub async fn list_projects(
    req: HttpRequest,
    query: web::Query<ProjectListParams>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.list_projects(query.into_inner(), &req).await
}

pub async fn get_project(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.get_project(id.0, &req).await
}

pub async fn create_project(
    req: HttpRequest,
    body: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE.create_project(body.into_inner(), &req).await
}

pub async fn update_project(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateProjectRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE
        .update_project(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_project(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE.delete_project(id.0, &req).await
}

pub async fn list_members(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.list_members(id.0, &req).await
}

pub async fn add_member(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateProjectMemberRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE
        .add_member(id.0, body.into_inner(), &req)
        .await
}

pub async fn update_member(
    req: HttpRequest,
    id: SafeIDI64,
    member_id: SafeMemberIdI64,
    body: web::Json<UpdateProjectMemberRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE
        .update_member(id.0, member_id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    id: SafeIDI64,
    member_id: SafeMemberIdI64,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = forbid_non_admin(&req) {
        return Ok(resp);
    }
    PROJECT_SERVICE
        .remove_member(id.0, member_id.0, &req)
        .await
}

pub fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_projects))
            .route("", web::post().to(create_project))
            .route("/{id}", web::get().to(get_project))
            .route("/{id}", web::put().to(update_project))
            .route("/{id}", web::delete().to(delete_project))
            .route("/{id}/members", web::get().to(list_members))
            .route("/{id}/members", web::post().to(add_member))
            .route("/{id}/members/{member_id}", web::put().to(update_member))
            .route("/{id}/members/{member_id}", web::delete().to(remove_member)),
    );
}
