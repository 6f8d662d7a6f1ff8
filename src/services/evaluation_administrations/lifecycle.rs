use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationAdministrationService, administration_code};
use crate::errors::Result;
use crate::models::{ApiResponse, evaluation_administrations::entities::EvaluationAdministration};
use crate::services::error_response;

fn respond(
    id: i64,
    action: &str,
    result: Result<EvaluationAdministration>,
) -> HttpResponse {
    match result {
        Ok(administration) => {
            info!(
                "Evaluation administration {} {}, now {}",
                id, action, administration.status
            );
            HttpResponse::Ok().json(ApiResponse::success(
                administration,
                format!("Evaluation administration {action}"),
            ))
        }
        Err(e) => error_response(&e, administration_code(&e)),
    }
}

/// Pending → Ongoing，开放评估并初始化评分行
pub async fn publish(
    service: &EvaluationAdministrationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(id, "published", storage.publish_administration(id).await))
}

pub async fn close(
    service: &EvaluationAdministrationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(id, "closed", storage.close_administration(id).await))
}

pub async fn cancel(
    service: &EvaluationAdministrationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    Ok(respond(id, "cancelled", storage.cancel_administration(id).await))
}
