use crate::entities::reservation_entity as reservations;
use crate::error::{AppError, AppResult};
use crate::models::{CreateReservationRequest, ReservationResponse, UpdateReservationRequest};
use crate::services::sale_service::MAX_QTY;
use crate::utils::{contains_any, int_in_range, money, optional_text, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Set,
};

const MAX_NAME_LEN: usize = 100;
const MAX_DATE_LEN: usize = 20;
const MAX_NOTES_LEN: usize = 2000;

#[derive(Clone)]
pub struct ReservationService {
    pool: DatabaseConnection,
}

impl ReservationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<ReservationResponse>> {
        let mut query = reservations::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(contains_any(
                [
                    reservations::Column::Customer,
                    reservations::Column::Item,
                    reservations::Column::Notes,
                ],
                term,
            ));
        }
        let list = query
            .order_by_desc(reservations::Column::CreatedAt)
            .order_by_desc(reservations::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<ReservationResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, req: CreateReservationRequest) -> AppResult<ReservationResponse> {
        let now = Utc::now();
        let created = reservations::ActiveModel {
            customer: Set(required_text("customer", &req.customer, MAX_NAME_LEN)?),
            item: Set(required_text("item", &req.item, MAX_NAME_LEN)?),
            qty: Set(int_in_range("qty", req.qty, 1, MAX_QTY)?),
            price_paid: Set(money("pricePaid", &req.price_paid)?),
            date_sold: Set(optional_text(
                "dateSold",
                req.date_sold.as_deref(),
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

    pub async fn update(&self, id: i64, req: UpdateReservationRequest) -> AppResult<ReservationResponse> {
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
        if let Some(date_sold) = req.date_sold {
            am.date_sold = Set(optional_text("dateSold", Some(&date_sold), MAX_DATE_LEN)?);
        }
        if let Some(notes) = req.notes {
            am.notes = Set(optional_text("notes", Some(&notes), MAX_NOTES_LEN)?);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find(id).await?;
        reservations::Entity::delete_by_id(existing.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<reservations::Model> {
        let not_found = || AppError::NotFound("Reservation not found".to_string());
        let id = i32::try_from(id).map_err(|_| not_found())?;
        reservations::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}
