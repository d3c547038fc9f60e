use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::catalog::ProductVariant,
    errors::AppResult,
    repositories::common,
};

/// 결제 시 재고 차감/복구 경계
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// 재고가 충분할 때만 차감합니다. 차감하지 못했으면 `false`
    async fn decrement(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<bool>;

    async fn restore(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<()>;
}

#[repository(name = "product_variant", collection = "product_variants")]
pub struct ProductVariantRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ProductVariantRepository {
    pub async fn insert(&self, mut variant: ProductVariant) -> AppResult<ProductVariant> {
        variant.id = Some(common::insert(&self.collection::<ProductVariant>(), &variant).await?);
        Ok(variant)
    }

    /// 재고가 자주 바뀌므로 캐시하지 않습니다.
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<ProductVariant>> {
        common::find_active_by_id(&self.collection::<ProductVariant>(), id).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<ProductVariant>> {
        common::find_active(&self.collection::<ProductVariant>(), doc! {}).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        common::count_active(&self.collection::<ProductVariant>(), doc! {}).await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> AppResult<Option<ProductVariant>> {
        common::update_active(&self.collection::<ProductVariant>(), doc! { "_id": id }, set).await
    }

    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<ProductVariant>(), doc! { "_id": id }).await
    }

    /// 재고가 충분할 때만 원자적으로 차감합니다. 차감하지 못했으면 `false`
    pub async fn decrement_stock(&self, id: &ObjectId, quantity: i64) -> AppResult<bool> {
        let result = self.collection::<ProductVariant>()
            .update_one(
                common::active(doc! { "_id": id, "stock": { "$gte": quantity } }),
                doc! {
                    "$inc": { "stock": -quantity },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// 실패한 결제의 차감분을 되돌립니다.
    pub async fn restore_stock(&self, id: &ObjectId, quantity: i64) -> AppResult<()> {
        self.collection::<ProductVariant>()
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$inc": { "stock": quantity },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let product_index = IndexModel::builder()
            .keys(doc! { "product_id": 1 })
            .options(IndexOptions::builder()
                .name("product_id".to_string())
                .build())
            .build();

        self.collection::<ProductVariant>()
            .create_index(product_index)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StockLedger for ProductVariantRepository {
    async fn decrement(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<bool> {
        self.decrement_stock(variant_id, quantity).await
    }

    async fn restore(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<()> {
        self.restore_stock(variant_id, quantity).await
    }
}
