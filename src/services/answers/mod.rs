pub mod options;
pub mod scales;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::answers::{
    CreateAnswerOptionRequest, CreateAnswerRequest, UpdateAnswerOptionRequest,
};
use crate::storage::Storage;

pub struct AnswerService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnswerService {
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

    // 答案量表
    pub async fn list_answers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        scales::list_answers(self, request).await
    }

    pub async fn create_answer(
        &self,
        req: CreateAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        scales::create_answer(self, req, request).await
    }

    // 量表下的选项
    pub async fn list_options(
        &self,
        answer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        options::list_options(self, answer_id, request).await
    }

    pub async fn create_option(
        &self,
        answer_id: i64,
        req: CreateAnswerOptionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        options::create_option(self, answer_id, req, request).await
    }

    pub async fn update_option(
        &self,
        answer_id: i64,
        option_id: i64,
        req: UpdateAnswerOptionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        options::update_option(self, answer_id, option_id, req, request).await
    }

    pub async fn delete_option(
        &self,
        answer_id: i64,
        option_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        options::delete_option(self, answer_id, option_id, request).await
    }
}
