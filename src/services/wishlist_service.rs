use crate::entities::{product_entity as products, wishlist_item_entity as wishlist_items};
use crate::error::{AppError, AppResult};
use crate::models::{WishlistEntryResponse, WishlistItemResponse};
use crate::services::catalog_service::MAX_PRODUCT_ID;
use crate::utils::{SessionLocks, int_in_range};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct WishlistService {
    pool: DatabaseConnection,
    locks: SessionLocks,
}

impl WishlistService {
    pub fn new(pool: DatabaseConnection, locks: SessionLocks) -> Self {
        Self { pool, locks }
    }

    /// Idempotent: adding a product twice returns the existing entry.
    pub async fn add(&self, session_id: &str, product_id: i64) -> AppResult<WishlistItemResponse> {
        let product_id = int_in_range("productId", product_id, 1, MAX_PRODUCT_ID)?;

        let _guard = self.locks.acquire(session_id).await;

        if products::Entity::find_by_id(product_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::ValidationError("Product not found".to_string()));
        }

        if let Some(existing) = self.find_entry(session_id, product_id).await? {
            return Ok(existing.into());
        }

        let created = wishlist_items::ActiveModel {
            session_id: Set(session_id.to_string()),
            product_id: Set(product_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.into())
    }

    /// Returns whether anything was removed.
    pub async fn remove(&self, session_id: &str, product_id: i64) -> AppResult<bool> {
        let product_id = int_in_range("productId", product_id, 1, MAX_PRODUCT_ID)?;
        let result = wishlist_items::Entity::delete_many()
            .filter(wishlist_items::Column::SessionId.eq(session_id))
            .filter(wishlist_items::Column::ProductId.eq(product_id))
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn is_member(&self, session_id: &str, product_id: i64) -> AppResult<bool> {
        let product_id = int_in_range("productId", product_id, 1, MAX_PRODUCT_ID)?;
        let count = wishlist_items::Entity::find()
            .filter(wishlist_items::Column::SessionId.eq(session_id))
            .filter(wishlist_items::Column::ProductId.eq(product_id))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Newest first; entries whose product is gone are dropped.
    pub async fn list(&self, session_id: &str) -> AppResult<Vec<WishlistEntryResponse>> {
        let rows = wishlist_items::Entity::find()
            .filter(wishlist_items::Column::SessionId.eq(session_id))
            .find_also_related(products::Entity)
            .order_by_desc(wishlist_items::Column::CreatedAt)
            .order_by_desc(wishlist_items::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, product)| {
                product.map(|product| WishlistEntryResponse {
                    item: item.into(),
                    product: product.into(),
                })
            })
            .collect())
    }

    async fn find_entry(
        &self,
        session_id: &str,
        product_id: i32,
    ) -> AppResult<Option<wishlist_items::Model>> {
        Ok(wishlist_items::Entity::find()
            .filter(wishlist_items::Column::SessionId.eq(session_id))
            .filter(wishlist_items::Column::ProductId.eq(product_id))
            .one(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    async fn service() -> WishlistService {
        WishlistService::new(test_pool().await, SessionLocks::new())
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let wishlist = service().await;
        let first = wishlist.add("s1", 3).await.unwrap();
        let second = wishlist.add("s1", 3).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(wishlist.list("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_membership_and_remove() {
        let wishlist = service().await;
        wishlist.add("s1", 3).await.unwrap();

        assert!(wishlist.is_member("s1", 3).await.unwrap());
        assert!(!wishlist.is_member("s2", 3).await.unwrap());

        assert!(wishlist.remove("s1", 3).await.unwrap());
        assert!(!wishlist.remove("s1", 3).await.unwrap());
        assert!(!wishlist.is_member("s1", 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_positive_product_id_is_rejected() {
        let wishlist = service().await;
        for id in [0, -5] {
            assert!(matches!(
                wishlist.is_member("s1", id).await,
                Err(AppError::ValidationError(_))
            ));
            assert!(matches!(
                wishlist.remove("s1", id).await,
                Err(AppError::ValidationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_with_products() {
        let wishlist = service().await;
        wishlist.add("s1", 1).await.unwrap();
        wishlist.add("s1", 4).await.unwrap();

        let list = wishlist.list("s1").await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].product.id, 4);
        assert_eq!(list[1].product.name, "Kawaii Cat Squishy");
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let wishlist = service().await;
        assert!(matches!(
            wishlist.add("s1", 4242).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
