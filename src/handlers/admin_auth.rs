use crate::middlewares::AdminIdentity;
use crate::models::*;
use crate::services::AdminAuthService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin-auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin info with access and refresh tokens", body = AdminAuthResponse),
        (status = 400, description = "Malformed credentials", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    )
)]
pub async fn login(
    service: web::Data<AdminAuthService>,
    payload: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match service.login(payload.into_inner()).await {
        Ok(auth) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": auth }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/refresh",
    tag = "admin-auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = AdminAuthResponse),
        (status = 401, description = "Invalid refresh token", body = ApiError),
        (status = 403, description = "Admin account disabled", body = ApiError)
    )
)]
pub async fn refresh(
    service: web::Data<AdminAuthService>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    match service.refresh(&payload.refresh_token).await {
        Ok(auth) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": auth }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/me",
    tag = "admin-auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Signed-in admin", body = AdminUserResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 403, description = "Admin account disabled", body = ApiError)
    )
)]
pub async fn me(
    service: web::Data<AdminAuthService>,
    admin: AdminIdentity,
) -> Result<HttpResponse> {
    match service.current_admin(admin.id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": user }))),
        Err(e) => Ok(e.error_response()),
    }
}
