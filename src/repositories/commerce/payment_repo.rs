use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::Payment,
    errors::AppResult,
    repositories::common,
};

#[repository(name = "payment", collection = "payments")]
pub struct PaymentRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl PaymentRepository {
    pub async fn insert(&self, mut payment: Payment) -> AppResult<Payment> {
        payment.id = Some(common::insert(&self.collection::<Payment>(), &payment).await?);
        Ok(payment)
    }

    /// 주문 생성이 실패했을 때 결제 레코드를 무효화합니다.
    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<Payment>(), doc! { "_id": id }).await
    }
}
