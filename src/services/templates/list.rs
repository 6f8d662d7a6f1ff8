use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TemplateService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode, Paginated,
    evaluation_templates::{
        TEMPLATES_PER_PAGE,
        entities::EvaluationTemplate,
        requests::{TemplateListParams, TemplateListQuery},
    },
};
use crate::services::error_response;

/// 模板列表，按筛选参数读穿缓存
pub async fn list_templates(
    service: &TemplateService,
    query: TemplateListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let list_query = TemplateListQuery {
        page: query.pagination.page(),
        size: TEMPLATES_PER_PAGE,
        evaluee_role_id: query.evaluee_role_id,
        evaluator_role_id: query.evaluator_role_id,
        is_active: query.is_active,
    };

    let cache = service.get_cache(request)?;
    let key = list_query.cache_key();
    if let Some(page) = cache.get_json::<Paginated<EvaluationTemplate>>(&key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Templates retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.list_templates(list_query).await {
        Ok(page) => {
            cache
                .insert_json(key, &page, AppConfig::get().cache.default_ttl)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                page,
                "Templates retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
