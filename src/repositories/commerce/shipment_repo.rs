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
    domain::entities::commerce::{Shipment, ShipmentStatus},
    errors::AppResult,
    repositories::common,
};

#[repository(name = "shipment", collection = "shipment_statuses")]
pub struct ShipmentRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ShipmentRepository {
    pub async fn insert(&self, mut shipment: Shipment) -> AppResult<Shipment> {
        shipment.id = Some(common::insert(&self.collection::<Shipment>(), &shipment).await?);
        Ok(shipment)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Shipment>> {
        common::find_active_by_id(&self.collection::<Shipment>(), id).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Shipment>> {
        common::find_active(&self.collection::<Shipment>(), doc! {}).await
    }

    /// 현재 상태가 `from`일 때만 `to`로 바꿉니다.
    ///
    /// 읽은 뒤 다른 관리자가 먼저 바꿨다면 `None`을 반환합니다.
    pub async fn transition(&self, id: &ObjectId, from: ShipmentStatus, to: ShipmentStatus) -> AppResult<Option<Shipment>> {
        common::update_active(
            &self.collection::<Shipment>(),
            doc! { "_id": id, "status": from.as_str() },
            doc! { "status": to.as_str() },
        )
        .await
    }

    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<Shipment>(), doc! { "_id": id }).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let order_index = IndexModel::builder()
            .keys(doc! { "order_id": 1 })
            .options(IndexOptions::builder()
                .name("order_id".to_string())
                .build())
            .build();

        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(IndexOptions::builder()
                .name("customer_id".to_string())
                .build())
            .build();

        self.collection::<Shipment>()
            .create_indexes([order_index, customer_index])
            .await?;
        Ok(())
    }
}
