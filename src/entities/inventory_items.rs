use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_SOLD_OUT: &str = "Sold out";
pub const STATUS_SHIPPING: &str = "Shipping";
pub const STATUS_LOW_STOCK: &str = "Low stock";
pub const STATUS_AVAILABLE: &str = "Available";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// purchase group the item arrived in ("GROUP 1", "N/A", ...)
    pub order_group: Option<String>,
    pub item_type: Option<String>,
    pub item: String,
    pub retail_price: String,
    pub resell_price: String,
    pub stock: i32,
    pub status: String,
    pub track: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn display_status(&self) -> String {
        display_status(self.stock, &self.status)
    }
}

/// Status shown to staff, derived from stock first and the stored label second.
pub fn display_status(stock: i32, stored: &str) -> String {
    let stored = stored.trim();
    if stock <= 0 {
        STATUS_SOLD_OUT.to_string()
    } else if stored.eq_ignore_ascii_case(STATUS_SHIPPING) {
        STATUS_SHIPPING.to_string()
    } else if stock <= 1 {
        STATUS_LOW_STOCK.to_string()
    } else if !stored.is_empty() {
        stored.to_string()
    } else {
        STATUS_AVAILABLE.to_string()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status_precedence() {
        assert_eq!(display_status(0, "Shipping"), "Sold out");
        assert_eq!(display_status(0, "Available"), "Sold out");
        assert_eq!(display_status(1, "Shipping"), "Shipping");
        assert_eq!(display_status(1, "Available"), "Low stock");
        assert_eq!(display_status(5, "Reserved"), "Reserved");
        assert_eq!(display_status(5, ""), "Available");
        assert_eq!(display_status(5, "   "), "Available");
    }
}
