use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ProductResponse;
use crate::entities::cart_item_entity;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// defaults to 1
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// 0 removes the line
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: i32,
    pub session_id: String,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<cart_item_entity::Model> for CartItemResponse {
    fn from(m: cart_item_entity::Model) -> Self {
        CartItemResponse {
            id: m.id,
            session_id: m.session_id,
            product_id: m.product_id,
            quantity: m.quantity,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub item: CartItemResponse,
    pub product: ProductResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total_items: i64,
    /// decimal string with two places
    pub total_price: String,
}

/// Result of a PATCH: either the updated line or nothing when quantity hit 0
#[derive(Debug, Clone)]
pub enum CartUpdateOutcome {
    Updated(CartItemResponse),
    Removed,
}
