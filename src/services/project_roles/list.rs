use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PROJECT_ROLES_CACHE_KEY, ProjectRoleService};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, project_roles::ProjectRole};
use crate::services::error_response;

/// 项目角色列表，读穿缓存
pub async fn list_project_roles(
    service: &ProjectRoleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request)?;

    if let Some(roles) = cache
        .get_json::<Vec<ProjectRole>>(PROJECT_ROLES_CACHE_KEY)
        .await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            roles,
            "Project roles retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.list_project_roles().await {
        Ok(roles) => {
            cache
                .insert_json(
                    PROJECT_ROLES_CACHE_KEY.to_string(),
                    &roles,
                    AppConfig::get().cache.default_ttl,
                )
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                roles,
                "Project roles retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
