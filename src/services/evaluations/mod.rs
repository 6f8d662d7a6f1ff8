pub mod admin;
pub mod list;
pub mod rater;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::BackofficeError;
use crate::models::ErrorCode;
use crate::models::evaluations::requests::{
    MyEvaluationListParams, SetForEvaluationRequest, SubmitAnswerRequest, SubmitCommentRequest,
};
use crate::models::PaginationQuery;
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

/// 评估流程错误码
pub(crate) fn evaluation_code(err: &BackofficeError) -> ErrorCode {
    match err {
        BackofficeError::NotFound(_) => ErrorCode::EvaluationNotFound,
        BackofficeError::InvalidState(_) => ErrorCode::EvaluationInvalidState,
        BackofficeError::Authorization(_) => ErrorCode::EvaluationNotRater,
        BackofficeError::Validation(_) => ErrorCode::EvaluationValidationFailed,
        other => ErrorCode::for_error(other),
    }
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 当前用户作为评估者的评估
    pub async fn list_my_evaluations(
        &self,
        query: MyEvaluationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_my_evaluations(self, query, request).await
    }

    // 某个结果下的全部评估（管理员）
    pub async fn list_result_evaluations(
        &self,
        result_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_result_evaluations(self, result_id, query, request).await
    }

    pub async fn get_evaluation(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_evaluation(self, id, request).await
    }

    pub async fn submit_answer(
        &self,
        id: i64,
        req: SubmitAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rater::submit_answer(self, id, req, request).await
    }

    pub async fn submit_comment(
        &self,
        id: i64,
        req: SubmitCommentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rater::submit_comment(self, id, req, request).await
    }

    pub async fn submit_evaluation(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rater::submit_evaluation(self, id, request).await
    }

    pub async fn set_for_evaluation(
        &self,
        id: i64,
        req: SetForEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::set_for_evaluation(self, id, req, request).await
    }

    pub async fn approve(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::approve(self, id, request).await
    }

    pub async fn decline(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::decline(self, id, request).await
    }

    pub async fn delete_evaluation(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::delete_evaluation(self, id, request).await
    }
}
