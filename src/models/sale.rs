use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sale_entity;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: i32,
    pub customer: String,
    pub item: String,
    pub qty: i32,
    pub price_paid: String,
    pub pickup_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<sale_entity::Model> for SaleResponse {
    fn from(m: sale_entity::Model) -> Self {
        SaleResponse {
            id: m.id,
            customer: m.customer,
            item: m.item,
            qty: m.qty,
            price_paid: m.price_paid,
            pickup_date: m.pickup_date,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub customer: String,
    pub item: String,
    pub qty: i64,
    pub price_paid: String,
    pub pickup_date: Option<String>,
    pub notes: Option<String>,
}

/// Shallow patch; omitted fields are left alone, blank optional text clears.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub customer: Option<String>,
    pub item: Option<String>,
    pub qty: Option<i64>,
    pub price_paid: Option<String>,
    pub pickup_date: Option<String>,
    pub notes: Option<String>,
}
