use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product. `price`/`original_price` hold decimal strings,
/// `tags` a JSON array of strings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: String,
    pub original_price: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl Model {
    /// Tag list; malformed JSON reads as no tags.
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
    #[sea_orm(has_many = "super::wishlist_items::Entity")]
    WishlistItems,
}

impl Related<super::cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::wishlist_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
