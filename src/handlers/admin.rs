use crate::models::*;
use crate::services::RewardService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use super::{admin_auth, inventory, reservations, sales};

#[utoipa::path(
    get,
    path = "/admin/rewards",
    tag = "admin-rewards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every reward, including inactive and sold out", body = [GameRewardResponse]),
        (status = 401, description = "Unauthorized", body = ApiError)
    )
)]
pub async fn list_all_rewards(service: web::Data<RewardService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/rewards/{id}",
    tag = "admin-rewards",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reward id")),
    request_body = SetRewardActiveRequest,
    responses(
        (status = 200, description = "Reward with its new active flag", body = GameRewardResponse),
        (status = 404, description = "Reward not found", body = ApiError)
    )
)]
pub async fn set_reward_active(
    service: web::Data<RewardService>,
    path: web::Path<i64>,
    payload: web::Json<SetRewardActiveRequest>,
) -> Result<HttpResponse> {
    match service
        .set_active(path.into_inner(), payload.is_active)
        .await
    {
        Ok(reward) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": reward }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Back-office routes. Everything except login and refresh sits behind `AuthMiddleware`.
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(admin_auth::login))
            .route("/refresh", web::post().to(admin_auth::refresh))
            .route("/me", web::get().to(admin_auth::me))
            .route("/rewards", web::get().to(list_all_rewards))
            .route("/rewards/{id}", web::patch().to(set_reward_active))
            .configure(sales::sales_routes)
            .configure(reservations::reservation_routes)
            .configure(inventory::inventory_routes),
    );
}
