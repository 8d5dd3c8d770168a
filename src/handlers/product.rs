use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products ordered by id", body = [ProductResponse])
    )
)]
pub async fn list_products(service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/featured",
    tag = "products",
    responses(
        (status = 200, description = "Featured products", body = [ProductResponse])
    )
)]
pub async fn featured_products(service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match service.featured().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/search",
    tag = "products",
    params(
        ("q" = String, Query, description = "Search term, 1-100 characters")
    ),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse]),
        (status = 400, description = "Missing or overlong query", body = ApiError)
    )
)]
pub async fn search_products(
    service: web::Data<CatalogService>,
    query: web::Query<ProductSearchQuery>,
) -> Result<HttpResponse> {
    match service.search(query.q.as_deref()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/category/{category}",
    tag = "products",
    params(
        ("category" = String, Path, description = "all, kawaii, stress-relief, fidget, food, therapy or sets")
    ),
    responses(
        (status = 200, description = "Products in the category", body = [ProductResponse]),
        (status = 400, description = "Unknown category", body = ApiError)
    )
)]
pub async fn products_by_category(
    service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.by_category(&path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Invalid id", body = ApiError),
        (status = 404, description = "No such product", body = ApiError)
    )
)]
pub async fn get_product(
    service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": product }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("/featured", web::get().to(featured_products))
            .route("/search", web::get().to(search_products))
            .route("/category/{category}", web::get().to(products_by_category))
            .route("/{id}", web::get().to(get_product)),
    );
}
