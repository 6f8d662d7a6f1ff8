pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::projects::requests::{
    CreateProjectMemberRequest, CreateProjectRequest, ProjectListParams,
    UpdateProjectMemberRequest, UpdateProjectRequest,
};
use crate::storage::Storage;

pub struct ProjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_projects(
        &self,
        query: ProjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_projects(self, query, request).await
    }

    pub async fn get_project(
        &self,
        project_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_project(self, project_id, request).await
    }

    pub async fn create_project(
        &self,
        req: CreateProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_project(self, req, request).await
    }

    pub async fn update_project(
        &self,
        project_id: i64,
        req: UpdateProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_project(self, project_id, req, request).await
    }

    pub async fn delete_project(
        &self,
        project_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_project(self, project_id, request).await
    }

    // 项目成员
    pub async fn list_members(
        &self,
        project_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, project_id, request).await
    }

    pub async fn add_member(
        &self,
        project_id: i64,
        req: CreateProjectMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, project_id, req, request).await
    }

    pub async fn update_member(
        &self,
        project_id: i64,
        member_id: i64,
        req: UpdateProjectMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::update_member(self, project_id, member_id, req, request).await
    }

    pub async fn remove_member(
        &self,
        project_id: i64,
        member_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, project_id, member_id, request).await
    }
}
