use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::inventory_item_entity;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemResponse {
    pub id: i32,
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub item: String,
    pub retail_price: String,
    pub resell_price: String,
    pub stock: i32,
    /// label as stored
    pub status: String,
    /// label derived from stock, recomputed on every read
    pub display_status: String,
    pub track: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<inventory_item_entity::Model> for InventoryItemResponse {
    fn from(m: inventory_item_entity::Model) -> Self {
        let display_status = m.display_status();
        InventoryItemResponse {
            id: m.id,
            order: m.order_group,
            item_type: m.item_type,
            item: m.item,
            retail_price: m.retail_price,
            resell_price: m.resell_price,
            stock: m.stock,
            status: m.status,
            display_status,
            track: m.track,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub item: String,
    pub retail_price: String,
    pub resell_price: String,
    /// defaults to 0
    pub stock: Option<i64>,
    /// defaults to "Available"
    pub status: Option<String>,
    pub track: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemRequest {
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub item: Option<String>,
    pub retail_price: Option<String>,
    pub resell_price: Option<String>,
    pub stock: Option<i64>,
    pub status: Option<String>,
    pub track: Option<String>,
    pub notes: Option<String>,
}
