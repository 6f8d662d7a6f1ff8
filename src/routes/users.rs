//! 账号管理（管理员）：`/api/v1/users`

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;
use crate::utils::SafeIDI64;

static ACCOUNTS: Lazy<UserService> = Lazy::new(UserService::new_lazy);

async fn list_accounts(
    req: HttpRequest,
    filters: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    ACCOUNTS.list_users(filters.into_inner(), &req).await
}

async fn register_account(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNTS.create_user(body.into_inner(), &req).await
}

async fn show_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNTS.get_user(id.0, &req).await
}

async fn edit_account(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNTS.update_user(id.0, body.into_inner(), &req).await
}

async fn remove_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNTS.delete_user(id.0, &req).await
}

pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // 后注册的中间件先执行：先认证，再校验管理员
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(admin_only())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .get(list_accounts)
                    .post(register_account),
            )
            .service(
                web::resource("/{id}")
                    .get(show_account)
                    .put(edit_account)
                    .delete(remove_account),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_account_routes_require_login() {
        let app = test::init_service(App::new().configure(configure_user_routes)).await;

        for req in [
            test::TestRequest::get().uri("/api/v1/users"),
            test::TestRequest::post().uri("/api/v1/users"),
            test::TestRequest::delete().uri("/api/v1/users/3"),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
