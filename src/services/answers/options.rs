use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AnswerService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    answers::{AnswerOption, CreateAnswerOptionRequest, UpdateAnswerOptionRequest},
};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

fn options_cache_key(answer_id: i64) -> String {
    format!("answers:{answer_id}:options")
}

// 量表不存在时返回 404 响应
async fn ensure_answer(
    storage: &Arc<dyn Storage>,
    answer_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_answer(answer_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::AnswerNotFound, "Answer not found")),
        Err(e) => Err(error_response(&e, ErrorCode::for_error(&e))),
    }
}

// 选项必须属于路径中的量表
async fn ensure_option(
    storage: &Arc<dyn Storage>,
    answer_id: i64,
    option_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_answer_option(option_id).await {
        Ok(Some(option)) if option.answer_id == answer_id => Ok(()),
        Ok(_) => Err(not_found(
            ErrorCode::AnswerOptionNotFound,
            "Answer option not found",
        )),
        Err(e) => Err(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn list_options(
    service: &AnswerService,
    answer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request)?;
    let key = options_cache_key(answer_id);
    if let Some(options) = cache.get_json::<Vec<AnswerOption>>(&key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            options,
            "Answer options retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_answer(&storage, answer_id).await {
        return Ok(resp);
    }

    match storage.list_answer_options(answer_id).await {
        Ok(options) => {
            cache
                .insert_json(key, &options, AppConfig::get().cache.default_ttl)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                options,
                "Answer options retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn create_option(
    service: &AnswerService,
    answer_id: i64,
    req: CreateAnswerOptionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_answer(&storage, answer_id).await {
        return Ok(resp);
    }

    match storage.create_answer_option(answer_id, req).await {
        Ok(option) => Ok(HttpResponse::Created().json(ApiResponse::success(
            option,
            "Answer option created successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn update_option(
    service: &AnswerService,
    answer_id: i64,
    option_id: i64,
    req: UpdateAnswerOptionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_option(&storage, answer_id, option_id).await {
        return Ok(resp);
    }

    match storage.update_answer_option(option_id, req).await {
        Ok(Some(option)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            option,
            "Answer option updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AnswerOptionNotFound,
            "Answer option not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn delete_option(
    service: &AnswerService,
    answer_id: i64,
    option_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_option(&storage, answer_id, option_id).await {
        return Ok(resp);
    }

    match storage.delete_answer_option(option_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Answer option deleted successfully"))),
        Ok(false) => Ok(not_found(
            ErrorCode::AnswerOptionNotFound,
            "Answer option not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
