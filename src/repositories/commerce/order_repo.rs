use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::Order,
    errors::AppResult,
    repositories::common,
};

#[repository(name = "order", collection = "orders")]
pub struct OrderRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl OrderRepository {
    pub async fn insert(&self, mut order: Order) -> AppResult<Order> {
        order.id = Some(common::insert(&self.collection::<Order>(), &order).await?);
        Ok(order)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Order>> {
        common::find_active_by_id(&self.collection::<Order>(), id).await
    }

    pub async fn find_by_customer(&self, customer_id: &ObjectId) -> AppResult<Vec<Order>> {
        common::find_active(&self.collection::<Order>(), doc! { "customer_id": customer_id }).await
    }

    /// 배송 생성에 실패한 주문을 무효화합니다.
    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<Order>(), doc! { "_id": id }).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Order>> {
        common::find_active(&self.collection::<Order>(), doc! {}).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("customer_created_at".to_string())
                .build())
            .build();

        self.collection::<Order>()
            .create_index(customer_index)
            .await?;
        Ok(())
    }
}
