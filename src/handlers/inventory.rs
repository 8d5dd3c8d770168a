use crate::models::*;
use crate::services::InventoryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/inventory",
    tag = "admin-inventory",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Matches item, order, type, status, track or notes")
    ),
    responses(
        (status = 200, description = "Inventory with derived displayStatus, newest first", body = [InventoryItemResponse]),
        (status = 401, description = "Unauthorized", body = ApiError)
    )
)]
pub async fn list_inventory(
    service: web::Data<InventoryService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match service.list(query.search.as_deref()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/inventory/{id}",
    tag = "admin-inventory",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "The item", body = InventoryItemResponse),
        (status = 404, description = "Inventory item not found", body = ApiError)
    )
)]
pub async fn get_inventory_item(
    service: web::Data<InventoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": item }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/inventory",
    tag = "admin-inventory",
    security(("bearer_auth" = [])),
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Item added", body = InventoryItemResponse),
        (status = 400, description = "Invalid inventory data", body = ApiError)
    )
)]
pub async fn create_inventory_item(
    service: web::Data<InventoryService>,
    payload: web::Json<CreateInventoryItemRequest>,
) -> Result<HttpResponse> {
    match service.create(payload.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": item }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/inventory/{id}",
    tag = "admin-inventory",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Inventory item id")),
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Updated item", body = InventoryItemResponse),
        (status = 404, description = "Inventory item not found", body = ApiError)
    )
)]
pub async fn update_inventory_item(
    service: web::Data<InventoryService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateInventoryItemRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), payload.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": item }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/inventory/{id}",
    tag = "admin-inventory",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Inventory item not found", body = ApiError)
    )
)]
pub async fn delete_inventory_item(
    service: web::Data<InventoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Inventory item deleted successfully")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn inventory_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/inventory", web::get().to(list_inventory))
        .route("/inventory", web::post().to(create_inventory_item))
        .route("/inventory/{id}", web::get().to(get_inventory_item))
        .route("/inventory/{id}", web::patch().to(update_inventory_item))
        .route("/inventory/{id}", web::delete().to(delete_inventory_item));
}
