use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnswerService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    answers::{Answer, CreateAnswerRequest},
};
use crate::services::error_response;

const ANSWERS_CACHE_KEY: &str = "answers:all";

pub async fn list_answers(
    service: &AnswerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request)?;
    if let Some(answers) = cache.get_json::<Vec<Answer>>(ANSWERS_CACHE_KEY).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            answers,
            "Answers retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.list_answers().await {
        Ok(answers) => {
            cache
                .insert_json(
                    ANSWERS_CACHE_KEY.to_string(),
                    &answers,
                    AppConfig::get().cache.default_ttl,
                )
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                answers,
                "Answers retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn create_answer(
    service: &AnswerService,
    req: CreateAnswerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    match storage.create_answer(req).await {
        Ok(answer) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(answer, "Answer created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
