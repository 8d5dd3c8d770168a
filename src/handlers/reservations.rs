use crate::models::*;
use crate::services::ReservationService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/reservations",
    tag = "admin-reservations",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Matches customer, item or notes")
    ),
    responses(
        (status = 200, description = "Reservations, newest first", body = [ReservationResponse]),
        (status = 401, description = "Unauthorized", body = ApiError)
    )
)]
pub async fn list_reservations(
    service: web::Data<ReservationService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match service.list(query.search.as_deref()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reservations/{id}",
    tag = "admin-reservations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "The reservation", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ApiError)
    )
)]
pub async fn get_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(reservation) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": reservation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/reservations",
    tag = "admin-reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation recorded", body = ReservationResponse),
        (status = 400, description = "Invalid reservation data", body = ApiError)
    )
)]
pub async fn create_reservation(
    service: web::Data<ReservationService>,
    payload: web::Json<CreateReservationRequest>,
) -> Result<HttpResponse> {
    match service.create(payload.into_inner()).await {
        Ok(reservation) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": reservation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/reservations/{id}",
    tag = "admin-reservations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reservation id")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ApiError)
    )
)]
pub async fn update_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateReservationRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), payload.into_inner()).await {
        Ok(reservation) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": reservation }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/reservations/{id}",
    tag = "admin-reservations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 404, description = "Reservation not found", body = ApiError)
    )
)]
pub async fn delete_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Reservation deleted successfully")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn reservation_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reservations", web::get().to(list_reservations))
        .route("/reservations", web::post().to(create_reservation))
        .route("/reservations/{id}", web::get().to(get_reservation))
        .route("/reservations/{id}", web::patch().to(update_reservation))
        .route("/reservations/{id}", web::delete().to(delete_reservation));
}
