use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ProductResponse;
use crate::entities::wishlist_item_entity;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemResponse {
    pub id: i32,
    pub session_id: String,
    pub product_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<wishlist_item_entity::Model> for WishlistItemResponse {
    fn from(m: wishlist_item_entity::Model) -> Self {
        WishlistItemResponse {
            id: m.id,
            session_id: m.session_id,
            product_id: m.product_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntryResponse {
    #[serde(flatten)]
    pub item: WishlistItemResponse,
    pub product: ProductResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCheckResponse {
    pub is_in_wishlist: bool,
}
