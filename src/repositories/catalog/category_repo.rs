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
    domain::entities::catalog::Category,
    errors::AppResult,
    repositories::common,
};

#[repository(name = "category", collection = "categories")]
pub struct CategoryRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl CategoryRepository {
    pub async fn insert(&self, mut category: Category) -> AppResult<Category> {
        category.id = Some(common::insert(&self.collection::<Category>(), &category).await?);
        Ok(category)
    }

    /// 삭제되지 않은 카테고리 (10분 캐시)
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Category>(&cache_key).await {
            return Ok(Some(cached));
        }

        let category = common::find_active_by_id(&self.collection::<Category>(), id).await?;

        if let Some(ref category) = category {
            let _ = self.redis
                .set_with_expiry(&cache_key, category, 600)
                .await;
        }

        Ok(category)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        common::find_active(&self.collection::<Category>(), doc! {}).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        common::count_active(&self.collection::<Category>(), doc! {}).await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> AppResult<Option<Category>> {
        let updated = common::update_active(&self.collection::<Category>(), doc! { "_id": id }, set).await?;

        if updated.is_some() {
            let _ = self.invalidate_cache(&id.to_hex()).await;
        }
        Ok(updated)
    }

    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        let deleted = common::soft_delete(&self.collection::<Category>(), doc! { "_id": id }).await?;

        if deleted {
            let _ = self.invalidate_cache(&id.to_hex()).await;
        }
        Ok(deleted)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<Category>()
            .create_index(created_at_index)
            .await?;
        Ok(())
    }
}
