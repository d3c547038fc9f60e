use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::catalog::Product,
    errors::AppResult,
    repositories::common,
};

#[repository(name = "product", collection = "products")]
pub struct ProductRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ProductRepository {
    pub async fn insert(&self, mut product: Product) -> AppResult<Product> {
        product.id = Some(common::insert(&self.collection::<Product>(), &product).await?);
        Ok(product)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Product>(&cache_key).await {
            return Ok(Some(cached));
        }

        let product = common::find_active_by_id(&self.collection::<Product>(), id).await?;

        if let Some(ref product) = product {
            let _ = self.redis
                .set_with_expiry(&cache_key, product, 600)
                .await;
        }

        Ok(product)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Product>> {
        common::find_active(&self.collection::<Product>(), doc! {}).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        common::count_active(&self.collection::<Product>(), doc! {}).await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> AppResult<Option<Product>> {
        let updated = common::update_active(&self.collection::<Product>(), doc! { "_id": id }, set).await?;

        if updated.is_some() {
            let _ = self.invalidate_cache(&id.to_hex()).await;
        }
        Ok(updated)
    }

    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        let deleted = common::soft_delete(&self.collection::<Product>(), doc! { "_id": id }).await?;

        if deleted {
            let _ = self.invalidate_cache(&id.to_hex()).await;
        }
        Ok(deleted)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(IndexOptions::builder()
                .name("category_id".to_string())
                .build())
            .build();

        self.collection::<Product>()
            .create_index(category_index)
            .await?;
        Ok(())
    }
}
