use crate::entities::sale_entity as sales;
use crate::error::{AppError, AppResult};
use crate::models::{CreateSaleRequest, SaleResponse, UpdateSaleRequest};
use crate::utils::{contains_any, int_in_range, money, optional_text, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Set,
};

const MAX_NAME_LEN: usize = 100;
const MAX_DATE_LEN: usize = 20;
const MAX_NOTES_LEN: usize = 2000;
pub(crate) const MAX_QTY: i64 = 10_000;

#[derive(Clone)]
pub struct SaleService {
    pool: DatabaseConnection,
}

impl SaleService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Newest first, optionally narrowed by a customer/item/notes search.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<SaleResponse>> {
        let mut query = sales::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(contains_any(
                [
                    sales::Column::Customer,
                    sales::Column::Item,
                    sales::Column::Notes,
                ],
                term,
            ));
        }
        let list = query
            .order_by_desc(sales::Column::CreatedAt)
            .order_by_desc(sales::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<SaleResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, req: CreateSaleRequest) -> AppResult<SaleResponse> {
        let now = Utc::now();
        let created = sales::ActiveModel {
            customer: Set(required_text("customer", &req.customer, MAX_NAME_LEN)?),
            item: Set(required_text("item", &req.item, MAX_NAME_LEN)?),
            qty: Set(int_in_range("qty", req.qty, 1, MAX_QTY)?),
            price_paid: Set(money("pricePaid", &req.price_paid)?),
            pickup_date: Set(optional_text(
                "pickupDate",
                req.pickup_date.as_deref(),
                MAX_DATE_LEN,
            )?),
            notes: Set(optional_text("notes", req.notes.as_deref(), MAX_NOTES_LEN)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.into())
    }

    pub async fn update(&self, id: i64, req: UpdateSaleRequest) -> AppResult<SaleResponse> {
        let existing = self.find(id).await?;
        let mut am = existing.into_active_model();

        if let Some(customer) = req.customer {
            am.customer = Set(required_text("customer", &customer, MAX_NAME_LEN)?);
        }
        if let Some(item) = req.item {
            am.item = Set(required_text("item", &item, MAX_NAME_LEN)?);
        }
        if let Some(qty) = req.qty {
            am.qty = Set(int_in_range("qty", qty, 1, MAX_QTY)?);
        }
        if let Some(price) = req.price_paid {
            am.price_paid = Set(money("pricePaid", &price)?);
        }
        if let Some(pickup) = req.pickup_date {
            am.pickup_date = Set(optional_text("pickupDate", Some(&pickup), MAX_DATE_LEN)?);
        }
        if let Some(notes) = req.notes {
            am.notes = Set(optional_text("notes", Some(&notes), MAX_NOTES_LEN)?);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find(id).await?;
        sales::Entity::delete_by_id(existing.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<sales::Model> {
        let not_found = || AppError::NotFound("Sale not found".to_string());
        let id = i32::try_from(id).map_err(|_| not_found())?;
        sales::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn new_sale(customer: &str) -> CreateSaleRequest {
        CreateSaleRequest {
            customer: customer.to_string(),
            item: "ZIZI".to_string(),
            qty: 1,
            price_paid: "55".to_string(),
            pickup_date: Some("7/01/2025".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_and_search() {
        let service = SaleService::new(test_pool().await);
        assert_eq!(service.list(None).await.unwrap().len(), 6);

        let sisi = service.list(Some("sisi")).await.unwrap();
        assert_eq!(sisi.len(), 2);

        // notes are searched too
        let dada = service.list(Some("DADA")).await.unwrap();
        assert_eq!(dada.len(), 1);
        assert_eq!(dada[0].customer, "Shelby");
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let service = SaleService::new(test_pool().await);
        let created = service.create(new_sale("Noor")).await.unwrap();
        assert_eq!(created.price_paid, "55.00");
        assert_eq!(service.list(None).await.unwrap()[0].id, created.id);

        let updated = service
            .update(
                i64::from(created.id),
                UpdateSaleRequest {
                    qty: Some(2),
                    notes: Some("paid in cash".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.qty, 2);
        assert_eq!(updated.customer, "Noor");
        assert_eq!(updated.notes.as_deref(), Some("paid in cash"));
        assert!(updated.updated_at >= created.updated_at);

        service.delete(i64::from(created.id)).await.unwrap();
        assert!(matches!(
            service.get(i64::from(created.id)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_validation() {
        let service = SaleService::new(test_pool().await);
        let mut bad = new_sale("");
        assert!(service.create(bad.clone()).await.is_err());
        bad.customer = "ok".into();
        bad.price_paid = "free".into();
        assert!(service.create(bad).await.is_err());
    }
}
