use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationAdministrationService, administration_code};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluation_administrations::{
        ADMINISTRATIONS_PER_PAGE,
        requests::{
            AdministrationListParams, AdministrationListQuery, CreateAdministrationRequest,
            UpdateAdministrationRequest,
        },
    },
};
use crate::services::{error_response, not_found, unauthorized};

pub async fn list_administrations(
    service: &EvaluationAdministrationService,
    query: AdministrationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = AdministrationListQuery {
        page: query.pagination.page(),
        size: ADMINISTRATIONS_PER_PAGE,
        status: query.status,
        search: query.search,
    };

    match storage.list_administrations(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Evaluation administrations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn get_administration(
    service: &EvaluationAdministrationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_administration(id).await {
        Ok(Some(administration)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            administration,
            "Evaluation administration retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AdministrationNotFound,
            "Evaluation administration not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}

pub async fn create_administration(
    service: &EvaluationAdministrationService,
    req: CreateAdministrationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(created_by) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    match storage.create_administration(created_by, req).await {
        Ok(administration) => Ok(HttpResponse::Created().json(ApiResponse::success(
            administration,
            "Evaluation administration created successfully",
        ))),
        Err(e) => Ok(error_response(&e, administration_code(&e))),
    }
}

pub async fn update_administration(
    service: &EvaluationAdministrationService,
    id: i64,
    req: UpdateAdministrationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let storage = service.get_storage(request)?;
    match storage.update_administration(id, req).await {
        Ok(administration) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            administration,
            "Evaluation administration updated successfully",
        ))),
        Err(e) => Ok(error_response(&e, administration_code(&e))),
    }
}

pub async fn delete_administration(
    service: &EvaluationAdministrationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_administration(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Evaluation administration deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e, administration_code(&e))),
    }
}
