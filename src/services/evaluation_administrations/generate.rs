use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationAdministrationService, administration_code};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, evaluation_administrations::requests::GenerateEvaluationsRequest,
};
use crate::services::error_response;

pub async fn generate_evaluations(
    service: &EvaluationAdministrationService,
    id: i64,
    req: GenerateEvaluationsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let hr_role_id = AppConfig::get().evaluation.hr_template_evaluee_role_id;

    match storage
        .generate_evaluations(id, req.employee_ids, hr_role_id)
        .await
    {
        Ok(response) => {
            info!(
                "Generated evaluations for administration {}: {:?}",
                id, response.summary
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Evaluations generated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, administration_code(&e))),
    }
}
