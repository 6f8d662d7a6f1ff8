pub mod crud;
pub mod generate;
pub mod lifecycle;
pub mod results;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::BackofficeError;
use crate::models::ErrorCode;
use crate::models::evaluation_administrations::requests::{
    AdministrationListParams, CreateAdministrationRequest, GenerateEvaluationsRequest,
    UpdateAdministrationRequest,
};
use crate::models::evaluation_results::requests::ResultListParams;
use crate::storage::Storage;

pub struct EvaluationAdministrationService {
    storage: Option<Arc<dyn Storage>>,
}

/// 评估周期相关错误码
pub(crate) fn administration_code(err: &BackofficeError) -> ErrorCode {
    match err {
        BackofficeError::NotFound(_) => ErrorCode::AdministrationNotFound,
        BackofficeError::InvalidState(_) => ErrorCode::AdministrationInvalidState,
        other => ErrorCode::for_error(other),
    }
}

impl EvaluationAdministrationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_administrations(
        &self,
        query: AdministrationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::list_administrations(self, query, request).await
    }

    pub async fn get_administration(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::get_administration(self, id, request).await
    }

    pub async fn create_administration(
        &self,
        req: CreateAdministrationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_administration(self, req, request).await
    }

    pub async fn update_administration(
        &self,
        id: i64,
        req: UpdateAdministrationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_administration(self, id, req, request).await
    }

    pub async fn delete_administration(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::delete_administration(self, id, request).await
    }

    // 为选定员工生成评估
    pub async fn generate_evaluations(
        &self,
        id: i64,
        req: GenerateEvaluationsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_evaluations(self, id, req, request).await
    }

    pub async fn publish(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lifecycle::publish(self, id, request).await
    }

    pub async fn close(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lifecycle::close(self, id, request).await
    }

    pub async fn cancel(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lifecycle::cancel(self, id, request).await
    }

    pub async fn list_results(
        &self,
        id: i64,
        query: ResultListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::list_results(self, id, query, request).await
    }
}
