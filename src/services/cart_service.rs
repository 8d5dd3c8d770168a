use crate::entities::{cart_item_entity as cart_items, product_entity as products};
use crate::error::{AppError, AppResult};
use crate::models::{CartItemResponse, CartLineResponse, CartResponse, CartUpdateOutcome};
use crate::services::catalog_service::MAX_PRODUCT_ID;
use crate::utils::{SessionLocks, format_money, int_in_range};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::str::FromStr;

pub const MAX_LINE_QUANTITY: i64 = 100;

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
    locks: SessionLocks,
}

impl CartService {
    pub fn new(pool: DatabaseConnection, locks: SessionLocks) -> Self {
        Self { pool, locks }
    }

    /// Add `quantity` of a product, merging into the session's existing line.
    pub async fn add_to_cart(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: Option<i64>,
    ) -> AppResult<CartItemResponse> {
        let quantity = int_in_range("quantity", quantity.unwrap_or(1), 1, MAX_LINE_QUANTITY)?;
        let product_id = int_in_range("productId", product_id, 1, MAX_PRODUCT_ID)?;

        let _guard = self.locks.acquire(session_id).await;
        let txn = self.pool.begin().await?;

        if products::Entity::find_by_id(product_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(AppError::ValidationError("Product not found".to_string()));
        }

        let existing = cart_items::Entity::find()
            .filter(cart_items::Column::SessionId.eq(session_id))
            .filter(cart_items::Column::ProductId.eq(product_id))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(line) => {
                let merged = i64::from(line.quantity) + i64::from(quantity);
                if merged > MAX_LINE_QUANTITY {
                    return Err(AppError::ValidationError(format!(
                        "quantity in cart cannot exceed {MAX_LINE_QUANTITY}"
                    )));
                }
                let mut am = line.into_active_model();
                am.quantity = Set(merged as i32);
                am.update(&txn).await?
            }
            None => {
                cart_items::ActiveModel {
                    session_id: Set(session_id.to_string()),
                    product_id: Set(product_id),
                    quantity: Set(quantity),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(saved.into())
    }

    /// Set a line's quantity directly; 0 deletes the line.
    pub async fn update_quantity(
        &self,
        session_id: &str,
        item_id: i64,
        quantity: i64,
    ) -> AppResult<CartUpdateOutcome> {
        let quantity = int_in_range("quantity", quantity, 0, MAX_LINE_QUANTITY)?;

        let _guard = self.locks.acquire(session_id).await;
        let line = self.find_line(session_id, item_id).await?;

        if quantity == 0 {
            cart_items::Entity::delete_by_id(line.id)
                .exec(&self.pool)
                .await?;
            return Ok(CartUpdateOutcome::Removed);
        }

        let mut am = line.into_active_model();
        am.quantity = Set(quantity);
        let updated = am.update(&self.pool).await?;
        Ok(CartUpdateOutcome::Updated(updated.into()))
    }

    pub async fn remove_from_cart(&self, session_id: &str, item_id: i64) -> AppResult<()> {
        let Ok(item_id) = i32::try_from(item_id) else {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        };
        let result = cart_items::Entity::delete_many()
            .filter(cart_items::Column::Id.eq(item_id))
            .filter(cart_items::Column::SessionId.eq(session_id))
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        }
        Ok(())
    }

    pub async fn clear_cart(&self, session_id: &str) -> AppResult<()> {
        cart_items::Entity::delete_many()
            .filter(cart_items::Column::SessionId.eq(session_id))
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    /// Lines with their products plus totals, recomputed on every call.
    pub async fn list_cart(&self, session_id: &str) -> AppResult<CartResponse> {
        let rows = cart_items::Entity::find()
            .filter(cart_items::Column::SessionId.eq(session_id))
            .find_also_related(products::Entity)
            .order_by_asc(cart_items::Column::CreatedAt)
            .order_by_asc(cart_items::Column::Id)
            .all(&self.pool)
            .await?;

        let mut total_items: i64 = 0;
        let mut total_price = Decimal::ZERO;
        let mut items = Vec::with_capacity(rows.len());

        // rows whose product vanished are skipped
        for (line, product) in rows {
            let Some(product) = product else { continue };
            let price = Decimal::from_str(&product.price).map_err(|e| {
                AppError::InternalError(format!("bad price on product {}: {e}", product.id))
            })?;
            total_items += i64::from(line.quantity);
            total_price += price * Decimal::from(line.quantity);
            items.push(CartLineResponse {
                item: line.into(),
                product: product.into(),
            });
        }

        Ok(CartResponse {
            items,
            total_items,
            total_price: format_money(total_price),
        })
    }

    async fn find_line(&self, session_id: &str, item_id: i64) -> AppResult<cart_items::Model> {
        let not_found = || AppError::NotFound("Cart item not found".to_string());
        let item_id = i32::try_from(item_id).map_err(|_| not_found())?;
        cart_items::Entity::find_by_id(item_id)
            .filter(cart_items::Column::SessionId.eq(session_id))
            .one(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}
