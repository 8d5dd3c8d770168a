use crate::error::AppError;
use crate::middlewares::SessionId;
use crate::models::*;
use crate::services::WishlistService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "wishlist",
    responses(
        (status = 200, description = "Wishlist entries with products, newest first", body = [WishlistEntryResponse])
    )
)]
pub async fn get_wishlist(
    service: web::Data<WishlistService>,
    session: SessionId,
) -> Result<HttpResponse> {
    match service.list(session.as_str()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wishlist",
    tag = "wishlist",
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Entry created, or the existing one", body = WishlistItemResponse),
        (status = 400, description = "Unknown product", body = ApiError)
    )
)]
pub async fn add_to_wishlist(
    service: web::Data<WishlistService>,
    session: SessionId,
    payload: web::Json<AddToWishlistRequest>,
) -> Result<HttpResponse> {
    match service.add(session.as_str(), payload.product_id).await {
        Ok(item) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": item }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/wishlist/{productId}",
    tag = "wishlist",
    params(
        ("productId" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 400, description = "Product id out of range", body = ApiError),
        (status = 404, description = "Product was not in the wishlist", body = ApiError)
    )
)]
pub async fn remove_from_wishlist(
    service: web::Data<WishlistService>,
    session: SessionId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.remove(session.as_str(), path.into_inner()).await {
        Ok(true) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Item removed from wishlist")
        }))),
        Ok(false) => Ok(AppError::NotFound("Item not found in wishlist".to_string()).error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wishlist/check/{productId}",
    tag = "wishlist",
    params(
        ("productId" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Membership flag", body = WishlistCheckResponse),
        (status = 400, description = "Product id out of range", body = ApiError)
    )
)]
pub async fn check_wishlist(
    service: web::Data<WishlistService>,
    session: SessionId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.is_member(session.as_str(), path.into_inner()).await {
        Ok(is_in_wishlist) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": WishlistCheckResponse { is_in_wishlist }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wishlist_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wishlist")
            .route("", web::get().to(get_wishlist))
            .route("", web::post().to(add_to_wishlist))
            .route("/check/{product_id}", web::get().to(check_wishlist))
            .route("/{product_id}", web::delete().to(remove_from_wishlist)),
    );
}
