pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::project_roles::CreateProjectRoleRequest;
use crate::storage::Storage;

pub(crate) const PROJECT_ROLES_CACHE_KEY: &str = "project_roles:all";

pub struct ProjectRoleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectRoleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        super::cache_from_request(request)
    }

    pub async fn list_project_roles(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_project_roles(self, request).await
    }

    pub async fn create_project_role(
        &self,
        req: CreateProjectRoleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_project_role(self, req, request).await
    }
}
