use crate::middlewares::SessionId;
use crate::models::*;
use crate::services::CartService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Cart lines with totals", body = CartResponse)
    )
)]
pub async fn get_cart(
    service: web::Data<CartService>,
    session: SessionId,
) -> Result<HttpResponse> {
    match service.list_cart(session.as_str()).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": cart }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart",
    tag = "cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Line created or merged", body = CartItemResponse),
        (status = 400, description = "Bad quantity, unknown product or cap exceeded", body = ApiError)
    )
)]
/// Adding a product already in the cart increases that line's quantity.
pub async fn add_to_cart(
    service: web::Data<CartService>,
    session: SessionId,
    payload: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    let req = payload.into_inner();
    match service
        .add_to_cart(session.as_str(), req.product_id, req.quantity)
        .await
    {
        Ok(item) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": item }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/cart/{id}",
    tag = "cart",
    params(
        ("id" = i64, Path, description = "Cart line id")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Updated line, or a removal message when quantity is 0", body = CartItemResponse),
        (status = 400, description = "Quantity outside 0-100", body = ApiError),
        (status = 404, description = "No such line in this session", body = ApiError)
    )
)]
pub async fn update_cart_item(
    service: web::Data<CartService>,
    session: SessionId,
    path: web::Path<i64>,
    payload: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse> {
    match service
        .update_quantity(session.as_str(), path.into_inner(), payload.quantity)
        .await
    {
        Ok(CartUpdateOutcome::Updated(item)) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": item })))
        }
        Ok(CartUpdateOutcome::Removed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Item removed from cart")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/{id}",
    tag = "cart",
    params(
        ("id" = i64, Path, description = "Cart line id")
    ),
    responses(
        (status = 200, description = "Line removed", body = MessageResponse),
        (status = 404, description = "No such line in this session", body = ApiError)
    )
)]
pub async fn remove_cart_item(
    service: web::Data<CartService>,
    session: SessionId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service
        .remove_from_cart(session.as_str(), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Item removed from cart")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Cart emptied", body = MessageResponse)
    )
)]
pub async fn clear_cart(
    service: web::Data<CartService>,
    session: SessionId,
) -> Result<HttpResponse> {
    match service.clear_cart(session.as_str()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Cart cleared")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("", web::post().to(add_to_cart))
            .route("", web::delete().to(clear_cart))
            .route("/{id}", web::patch().to(update_cart_item))
            .route("/{id}", web::delete().to(remove_cart_item)),
    );
}
