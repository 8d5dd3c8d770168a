use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::product_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// decimal string, e.g. "12.99"
    pub price: String,
    pub original_price: Option<String>,
    pub image: String,
    pub category: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<product_entity::Model> for ProductResponse {
    fn from(m: product_entity::Model) -> Self {
        let tags = m.tag_list();
        ProductResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            original_price: m.original_price,
            image: m.image,
            category: m.category,
            tags,
            in_stock: m.in_stock,
            featured: m.featured,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductSearchQuery {
    pub q: Option<String>,
}
