use crate::models::*;
use crate::services::SaleService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/sales",
    tag = "admin-sales",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Matches customer, item or notes")
    ),
    responses(
        (status = 200, description = "Sales, newest first", body = [SaleResponse]),
        (status = 401, description = "Unauthorized", body = ApiError)
    )
)]
pub async fn list_sales(
    service: web::Data<SaleService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match service.list(query.search.as_deref()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/sales/{id}",
    tag = "admin-sales",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Sale id")),
    responses(
        (status = 200, description = "The sale", body = SaleResponse),
        (status = 404, description = "Sale not found", body = ApiError)
    )
)]
pub async fn get_sale(
    service: web::Data<SaleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(sale) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": sale }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/sales",
    tag = "admin-sales",
    security(("bearer_auth" = [])),
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = SaleResponse),
        (status = 400, description = "Invalid sale data", body = ApiError)
    )
)]
pub async fn create_sale(
    service: web::Data<SaleService>,
    payload: web::Json<CreateSaleRequest>,
) -> Result<HttpResponse> {
    match service.create(payload.into_inner()).await {
        Ok(sale) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": sale }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/sales/{id}",
    tag = "admin-sales",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Sale id")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Updated sale", body = SaleResponse),
        (status = 404, description = "Sale not found", body = ApiError)
    )
)]
pub async fn update_sale(
    service: web::Data<SaleService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateSaleRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), payload.into_inner()).await {
        Ok(sale) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": sale }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/sales/{id}",
    tag = "admin-sales",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale deleted", body = MessageResponse),
        (status = 404, description = "Sale not found", body = ApiError)
    )
)]
pub async fn delete_sale(
    service: web::Data<SaleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Sale deleted successfully")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn sales_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales", web::get().to(list_sales))
        .route("/sales", web::post().to(create_sale))
        .route("/sales/{id}", web::get().to(get_sale))
        .route("/sales/{id}", web::patch().to(update_sale))
        .route("/sales/{id}", web::delete().to(delete_sale));
}
