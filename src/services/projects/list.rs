use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    projects::{
        PROJECTS_PER_PAGE,
        requests::{ProjectListParams, ProjectListQuery},
    },
};
use crate::services::error_response;

pub async fn list_projects(
    service: &ProjectService,
    query: ProjectListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = ProjectListQuery {
        page: query.pagination.page(),
        size: PROJECTS_PER_PAGE,
        status: query.status,
        search: query.search,
    };

    match storage.list_projects(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Project list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::for_error(&e))),
    }
}
