use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::reservation_entity;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i32,
    pub customer: String,
    pub item: String,
    pub price_paid: String,
    pub qty: i32,
    pub date_sold: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<reservation_entity::Model> for ReservationResponse {
    fn from(m: reservation_entity::Model) -> Self {
        ReservationResponse {
            id: m.id,
            customer: m.customer,
            item: m.item,
            price_paid: m.price_paid,
            qty: m.qty,
            date_sold: m.date_sold,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub customer: String,
    pub item: String,
    pub price_paid: String,
    pub qty: i64,
    pub date_sold: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub customer: Option<String>,
    pub item: Option<String>,
    pub price_paid: Option<String>,
    pub qty: Option<i64>,
    pub date_sold: Option<String>,
    pub notes: Option<String>,
}
