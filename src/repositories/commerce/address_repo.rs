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
    domain::entities::commerce::Address,
    errors::AppResult,
    repositories::common,
};

/// 조회 범위: 특정 고객의 배송지만, 또는 전체(관리자)
#[derive(Debug, Clone, Copy)]
pub enum AddressScope {
    Customer(ObjectId),
    All,
}

impl AddressScope {
    fn filter(&self) -> Document {
        match self {
            AddressScope::Customer(customer_id) => doc! { "customer_id": customer_id },
            AddressScope::All => doc! {},
        }
    }
}

#[repository(name = "address", collection = "addresses")]
pub struct AddressRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl AddressRepository {
    pub async fn insert(&self, mut address: Address) -> AppResult<Address> {
        address.id = Some(common::insert(&self.collection::<Address>(), &address).await?);
        Ok(address)
    }

    pub async fn find_by_id(&self, id: &ObjectId, scope: AddressScope) -> AppResult<Option<Address>> {
        let mut filter = scope.filter();
        filter.insert("_id", id);

        Ok(self.collection::<Address>()
            .find_one(common::active(filter))
            .await?)
    }

    pub async fn find_all(&self, scope: AddressScope) -> AppResult<Vec<Address>> {
        common::find_active(&self.collection::<Address>(), scope.filter()).await
    }

    pub async fn count(&self, scope: AddressScope) -> AppResult<u64> {
        common::count_active(&self.collection::<Address>(), scope.filter()).await
    }

    /// 결제 시 사용할 고객의 가장 최근 배송지
    pub async fn find_latest_for_customer(&self, customer_id: &ObjectId) -> AppResult<Option<Address>> {
        Ok(self.collection::<Address>()
            .find_one(common::active(doc! { "customer_id": customer_id }))
            .sort(doc! { "created_at": -1 })
            .await?)
    }

    pub async fn update(&self, id: &ObjectId, scope: AddressScope, set: Document) -> AppResult<Option<Address>> {
        let mut filter = scope.filter();
        filter.insert("_id", id);

        common::update_active(&self.collection::<Address>(), filter, set).await
    }

    pub async fn soft_delete(&self, id: &ObjectId, scope: AddressScope) -> AppResult<bool> {
        let mut filter = scope.filter();
        filter.insert("_id", id);

        common::soft_delete(&self.collection::<Address>(), filter).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(IndexOptions::builder()
                .name("customer_id".to_string())
                .build())
            .build();

        self.collection::<Address>()
            .create_index(customer_index)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_filters() {
        let customer_id = ObjectId::new();

        assert_eq!(AddressScope::All.filter(), doc! {});
        assert_eq!(
            AddressScope::Customer(customer_id).filter(),
            doc! { "customer_id": customer_id }
        );
    }
}
