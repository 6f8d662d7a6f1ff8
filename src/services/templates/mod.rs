pub mod contents;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{BackofficeError, Result};
use crate::models::evaluation_templates::requests::{
    CreateTemplateContentRequest, CreateTemplateRequest, TemplateListParams,
    UpdateTemplateRequest,
};
use crate::storage::Storage;

pub struct TemplateService {
    storage: Option<Arc<dyn Storage>>,
}

impl TemplateService {
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

    pub async fn list_templates(
        &self,
        query: TemplateListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_templates(self, query, request).await
    }

    pub async fn get_template(
        &self,
        template_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_template(self, template_id, request).await
    }

    pub async fn create_template(
        &self,
        req: CreateTemplateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_template(self, req, request).await
    }

    pub async fn update_template(
        &self,
        template_id: i64,
        req: UpdateTemplateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_template(self, template_id, req, request).await
    }

    pub async fn delete_template(
        &self,
        template_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_template(self, template_id, request).await
    }

    pub async fn add_content(
        &self,
        template_id: i64,
        req: CreateTemplateContentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::add_content(self, template_id, req, request).await
    }

    pub async fn delete_content(
        &self,
        template_id: i64,
        content_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::delete_content(self, template_id, content_id, request).await
    }
}

/// 校验模板引用的项目角色与答案量表存在
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    role_ids: &[i64],
    answer_id: Option<i64>,
) -> Result<()> {
    for role_id in role_ids {
        if storage.get_project_role(*role_id).await?.is_none() {
            return Err(BackofficeError::validation(format!(
                "Project role {role_id} does not exist"
            )));
        }
    }
    if let Some(answer_id) = answer_id
        && storage.get_answer(answer_id).await?.is_none()
    {
        return Err(BackofficeError::validation(format!(
            "Answer {answer_id} does not exist"
        )));
    }
    Ok(())
}
