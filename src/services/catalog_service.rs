use crate::entities::product_entity as products;
use crate::error::{AppError, AppResult};
use crate::models::ProductResponse;
use crate::utils::{contains_any, int_in_range};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub const CATEGORIES: [&str; 7] = [
    "all",
    "kawaii",
    "stress-relief",
    "fidget",
    "food",
    "therapy",
    "sets",
];
const MAX_CATEGORY_LEN: usize = 50;
const MAX_QUERY_LEN: usize = 100;
pub const MAX_PRODUCT_ID: i64 = 999_999;

/// Read-only product catalog.
#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<ProductResponse>> {
        let list = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn featured(&self) -> AppResult<Vec<ProductResponse>> {
        let list = products::Entity::find()
            .filter(products::Column::Featured.eq(true))
            .order_by_asc(products::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<ProductResponse>> {
        let category = category.trim().to_lowercase();
        if category.is_empty()
            || category.len() > MAX_CATEGORY_LEN
            || !CATEGORIES.contains(&category.as_str())
        {
            return Err(AppError::ValidationError("Invalid category".to_string()));
        }

        let mut query = products::Entity::find();
        if category != "all" {
            query = query.filter(products::Column::Category.eq(category));
        }
        let list = query
            .order_by_asc(products::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive substring search over name, description and tags.
    pub async fn search(&self, q: Option<&str>) -> AppResult<Vec<ProductResponse>> {
        let term = q.map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return Err(AppError::ValidationError(
                "Search query is required".to_string(),
            ));
        }
        if term.chars().count() > MAX_QUERY_LEN {
            return Err(AppError::ValidationError(format!(
                "Search query must be at most {MAX_QUERY_LEN} characters"
            )));
        }

        // the tags column is JSON text, so its SQL match is only a prefilter
        let candidates = products::Entity::find()
            .filter(contains_any(
                [
                    products::Column::Name,
                    products::Column::Description,
                    products::Column::Tags,
                ],
                term,
            ))
            .order_by_asc(products::Column::Id)
            .all(&self.pool)
            .await?;

        let needle = term.to_lowercase();
        Ok(candidates
            .into_iter()
            .filter(|p| matches_term(p, &needle))
            .map(Into::into)
            .collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<ProductResponse> {
        let id = int_in_range("product id", id, 1, MAX_PRODUCT_ID)?;
        let product = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
        Ok(product.into())
    }
}

fn matches_term(product: &products::Model, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product
            .tag_list()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_list_and_featured() {
        let service = CatalogService::new(test_pool().await);
        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 8);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let featured = service.featured().await.unwrap();
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|p| p.featured));
    }

    #[tokio::test]
    async fn test_by_category() {
        let service = CatalogService::new(test_pool().await);
        let kawaii = service.by_category("kawaii").await.unwrap();
        assert_eq!(kawaii.len(), 3);
        assert!(kawaii.iter().all(|p| p.category == "kawaii"));

        assert_eq!(service.by_category("all").await.unwrap().len(), 8);
        assert!(matches!(
            service.by_category("weapons").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let service = CatalogService::new(test_pool().await);

        let by_name = service.search(Some("PANDA")).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Slow Rise Panda");

        // only present in tags
        let by_tag = service.search(Some("slow-rise")).await.unwrap();
        assert!(by_tag.iter().any(|p| p.name == "Slow Rise Panda"));

        assert!(service.search(Some("   ")).await.is_err());
        assert!(service.search(None).await.is_err());
        assert!(service.search(Some(&"a".repeat(101))).await.is_err());
    }

    #[tokio::test]
    async fn test_search_ignores_tag_json_syntax() {
        let service = CatalogService::new(test_pool().await);
        for q in ["[", "\"", "\",\"", "]"] {
            let hits = service.search(Some(q)).await.unwrap();
            assert!(hits.is_empty(), "{q:?} matched {} products", hits.len());
        }

        // a query spanning two adjacent tags is not a substring of either
        let product = service.get(1).await.unwrap();
        let spanning = format!("{}\",\"{}", product.tags[0], product.tags[1]);
        assert!(service.search(Some(&spanning)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_bounds() {
        let service = CatalogService::new(test_pool().await);
        let product = service.get(1).await.unwrap();
        assert_eq!(product.price, "12.99");
        assert_eq!(product.tags, vec!["cat", "kawaii", "stress-relief"]);

        assert!(matches!(service.get(0).await, Err(AppError::ValidationError(_))));
        assert!(matches!(
            service.get(1_000_000).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(service.get(999).await, Err(AppError::NotFound(_))));
    }
}
