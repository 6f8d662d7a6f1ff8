pub mod aggregate;
pub mod detail;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::BackofficeError;
use crate::models::ErrorCode;
use crate::storage::Storage;

pub struct EvaluationResultService {
    storage: Option<Arc<dyn Storage>>,
}

pub(crate) fn result_code(err: &BackofficeError) -> ErrorCode {
    match err {
        BackofficeError::NotFound(_) => ErrorCode::EvaluationResultNotFound,
        other => ErrorCode::for_error(other),
    }
}

impl EvaluationResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 结果及其模板明细
    pub async fn get_result(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_result(self, id, request).await
    }

    pub async fn delete_result(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::delete_result(self, id, request).await
    }

    // 手动重新汇总
    pub async fn aggregate_result(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        aggregate::aggregate_result(self, id, request).await
    }
}
