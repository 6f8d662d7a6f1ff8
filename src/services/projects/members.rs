use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ProjectService;
use crate::errors::{BackofficeError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    projects::{
        entities::ProjectMember,
        requests::{CreateProjectMemberRequest, UpdateProjectMemberRequest},
    },
};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

fn member_not_found() -> HttpResponse {
    not_found(ErrorCode::ProjectMemberNotFound, "Project member not found")
}

async fn project_exists(storage: &Arc<dyn Storage>, project_id: i64) -> Result<bool> {
    Ok(storage.get_project_by_id(project_id).await?.is_some())
}

// 成员必须属于路径中的项目
async fn find_member(
    storage: &Arc<dyn Storage>,
    project_id: i64,
    member_id: i64,
) -> Result<Option<ProjectMember>> {
    Ok(storage
        .get_project_member(member_id)
        .await?
        .filter(|m| m.project_id == project_id))
}

async fn check_role(storage: &Arc<dyn Storage>, role_id: i64) -> Result<()> {
    if storage.get_project_role(role_id).await?.is_none() {
        return Err(BackofficeError::validation(format!(
            "Project role {role_id} does not exist"
        )));
    }
    Ok(())
}

pub async fn list_members(
    service: &ProjectService,
    project_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match project_exists(&storage, project_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_found(ErrorCode::ProjectNotFound, "Project not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    match storage.list_project_members(project_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Project members retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn add_member(
    service: &ProjectService,
    project_id: i64,
    req: CreateProjectMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;

    match project_exists(&storage, project_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_found(ErrorCode::ProjectNotFound, "Project not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    match storage.get_user_by_id(req.employee_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Employee not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    if let Err(e) = check_role(&storage, req.project_role_id).await {
        return Ok(error_response(&e, ErrorCode::for_error(&e)));
    }

    match storage.create_project_member(project_id, req).await {
        Ok(member) => Ok(HttpResponse::Created().json(ApiResponse::success(
            member,
            "Project member added successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn update_member(
    service: &ProjectService,
    project_id: i64,
    member_id: i64,
    req: UpdateProjectMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;

    match find_member(&storage, project_id, member_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(member_not_found()),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    if let Some(role_id) = req.project_role_id
        && let Err(e) = check_role(&storage, role_id).await
    {
        return Ok(error_response(&e, ErrorCode::for_error(&e)));
    }

    match storage.update_project_member(member_id, req).await {
        Ok(Some(member)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            member,
            "Project member updated successfully",
        ))),
        Ok(None) => Ok(member_not_found()),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn remove_member(
    service: &ProjectService,
    project_id: i64,
    member_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match find_member(&storage, project_id, member_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(member_not_found()),
        Err(e) => return Ok(error_response(&e, ErrorCode::for_error(&e))),
    }

    match storage.delete_project_member(member_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Project member removed successfully"))),
        Ok(false) => Ok(member_not_found()),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
