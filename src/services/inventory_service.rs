use crate::entities::inventory_item_entity::{self as inventory, STATUS_AVAILABLE};
use crate::error::{AppError, AppResult};
use crate::models::{CreateInventoryItemRequest, InventoryItemResponse, UpdateInventoryItemRequest};
use crate::utils::{contains_any, int_in_range, money, optional_text, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Set,
};

const MAX_GROUP_LEN: usize = 50;
const MAX_ITEM_LEN: usize = 100;
const MAX_TRACK_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 2000;
const MAX_STOCK: i64 = 100_000;

/// Stock sheet. Every read carries a freshly derived `displayStatus`.
#[derive(Clone)]
pub struct InventoryService {
    pool: DatabaseConnection,
}

impl InventoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<InventoryItemResponse>> {
        let mut query = inventory::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(contains_any(
                [
                    inventory::Column::Item,
                    inventory::Column::OrderGroup,
                    inventory::Column::ItemType,
                    inventory::Column::Status,
                    inventory::Column::Track,
                    inventory::Column::Notes,
                ],
                term,
            ));
        }
        let list = query
            .order_by_desc(inventory::Column::CreatedAt)
            .order_by_desc(inventory::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<InventoryItemResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, req: CreateInventoryItemRequest) -> AppResult<InventoryItemResponse> {
        let status = optional_text("status", req.status.as_deref(), MAX_GROUP_LEN)?
            .unwrap_or_else(|| STATUS_AVAILABLE.to_string());
        let now = Utc::now();

        let created = inventory::ActiveModel {
            order_group: Set(optional_text("order", req.order.as_deref(), MAX_GROUP_LEN)?),
            item_type: Set(optional_text("type", req.item_type.as_deref(), MAX_GROUP_LEN)?),
            item: Set(required_text("item", &req.item, MAX_ITEM_LEN)?),
            retail_price: Set(money("retailPrice", &req.retail_price)?),
            resell_price: Set(money("resellPrice", &req.resell_price)?),
            stock: Set(int_in_range("stock", req.stock.unwrap_or(0), 0, MAX_STOCK)?),
            status: Set(status),
            track: Set(optional_text("track", req.track.as_deref(), MAX_TRACK_LEN)?),
            notes: Set(optional_text("notes", req.notes.as_deref(), MAX_NOTES_LEN)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: i64,
        req: UpdateInventoryItemRequest,
    ) -> AppResult<InventoryItemResponse> {
        let existing = self.find(id).await?;
        let mut am = existing.into_active_model();

        if let Some(order) = req.order {
            am.order_group = Set(optional_text("order", Some(&order), MAX_GROUP_LEN)?);
        }
        if let Some(item_type) = req.item_type {
            am.item_type = Set(optional_text("type", Some(&item_type), MAX_GROUP_LEN)?);
        }
        if let Some(item) = req.item {
            am.item = Set(required_text("item", &item, MAX_ITEM_LEN)?);
        }
        if let Some(price) = req.retail_price {
            am.retail_price = Set(money("retailPrice", &price)?);
        }
        if let Some(price) = req.resell_price {
            am.resell_price = Set(money("resellPrice", &price)?);
        }
        if let Some(stock) = req.stock {
            am.stock = Set(int_in_range("stock", stock, 0, MAX_STOCK)?);
        }
        if let Some(status) = req.status {
            // the column is non-null; blank falls back to the default label
            am.status = Set(optional_text("status", Some(&status), MAX_GROUP_LEN)?
                .unwrap_or_else(|| STATUS_AVAILABLE.to_string()));
        }
        if let Some(track) = req.track {
            am.track = Set(optional_text("track", Some(&track), MAX_TRACK_LEN)?);
        }
        if let Some(notes) = req.notes {
            am.notes = Set(optional_text("notes", Some(&notes), MAX_NOTES_LEN)?);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find(id).await?;
        inventory::Entity::delete_by_id(existing.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<inventory::Model> {
        let not_found = || AppError::NotFound("Inventory item not found".to_string());
        let id = i32::try_from(id).map_err(|_| not_found())?;
        inventory::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn macaron(stock: i64, status: &str) -> CreateInventoryItemRequest {
        CreateInventoryItemRequest {
            order: Some("GROUP 9".to_string()),
            item_type: Some("MAC".to_string()),
            item: "ROSE LATTE".to_string(),
            retail_price: "30.00".to_string(),
            resell_price: "60.00".to_string(),
            stock: Some(stock),
            status: Some(status.to_string()),
            track: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let service = InventoryService::new(test_pool().await);
        let created = service.create(macaron(4, "Available")).await.unwrap();

        let fetched = service.get(i64::from(created.id)).await.unwrap();
        assert_eq!(fetched.item, "ROSE LATTE");
        assert_eq!(fetched.order.as_deref(), Some("GROUP 9"));
        assert_eq!(fetched.item_type.as_deref(), Some("MAC"));
        assert_eq!(fetched.retail_price, "30.00");
        assert_eq!(fetched.resell_price, "60.00");
        assert_eq!(fetched.stock, 4);
        assert_eq!(fetched.status, "Available");
        assert_eq!(fetched.display_status, "Available");
    }

    #[tokio::test]
    async fn test_display_status_recomputed_on_read() {
        let service = InventoryService::new(test_pool().await);
        let shipping = service.create(macaron(1, "Shipping")).await.unwrap();
        assert_eq!(shipping.display_status, "Shipping");

        let sold_out = service
            .update(
                i64::from(shipping.id),
                UpdateInventoryItemRequest {
                    stock: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(sold_out.status, "Shipping");
        assert_eq!(sold_out.display_status, "Sold out");

        let low = service.create(macaron(1, "Available")).await.unwrap();
        assert_eq!(low.display_status, "Low stock");
    }

    #[tokio::test]
    async fn test_defaults_and_search() {
        let service = InventoryService::new(test_pool().await);
        let mut bare = macaron(0, "");
        bare.stock = None;
        bare.status = None;
        let created = service.create(bare).await.unwrap();
        assert_eq!(created.stock, 0);
        assert_eq!(created.status, "Available");
        assert_eq!(created.display_status, "Sold out");

        // seeded sheet has 12 rows
        assert_eq!(service.list(None).await.unwrap().len(), 13);
        let parcel_three = service.list(Some("parcel 3")).await.unwrap();
        assert_eq!(parcel_three.len(), 3);
        assert_eq!(service.list(Some("has")).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_rejects_negative_stock() {
        let service = InventoryService::new(test_pool().await);
        assert!(matches!(
            service.create(macaron(-1, "Available")).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
