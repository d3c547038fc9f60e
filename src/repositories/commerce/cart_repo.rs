use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::Cart,
    errors::{AppError, AppResult},
    repositories::common,
};

/// 고객당 활성 장바구니는 하나. `is_deleted: false`인 문서에만 적용되는 고유 인덱스입니다.
const ACTIVE_CART_INDEX: &str = "customer_active_cart_unique";

#[repository(name = "cart", collection = "carts")]
pub struct CartRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl CartRepository {
    pub async fn find_active_by_customer(&self, customer_id: &ObjectId) -> AppResult<Option<Cart>> {
        Ok(self.collection::<Cart>()
            .find_one(common::active(doc! { "customer_id": customer_id }))
            .await?)
    }

    /// 동시에 첫 상품을 담은 다른 요청이 먼저 만들었으면 409
    pub async fn insert(&self, mut cart: Cart) -> AppResult<Cart> {
        cart.id = Some(common::insert(&self.collection::<Cart>(), &cart).await?);
        Ok(cart)
    }

    /// 장바구니 문서 전체를 교체합니다.
    ///
    /// 그 사이 결제되었거나 삭제된 장바구니면 409입니다.
    pub async fn save(&self, cart: &Cart) -> AppResult<()> {
        let id = cart
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 장바구니입니다".to_string()))?;

        let result = self.collection::<Cart>()
            .replace_one(common::active(doc! { "_id": id }), cart)
            .await?;

        ensure_saved(result.matched_count)
    }

    /// 결제를 위해 비어 있지 않은 활성 장바구니를 원자적으로 가져가며 삭제 표시합니다.
    ///
    /// 같은 장바구니로 동시에 들어온 두 번째 결제는 `None`을 받습니다.
    pub async fn claim_for_checkout(&self, customer_id: &ObjectId) -> AppResult<Option<Cart>> {
        Ok(self.collection::<Cart>()
            .find_one_and_update(
                claim_filter(customer_id),
                doc! { "$set": { "is_deleted": true, "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::Before)
            .await?)
    }

    /// 결제에 실패한 장바구니를 되살립니다.
    pub async fn release(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Cart>()
            .update_one(
                doc! { "_id": id, "is_deleted": true },
                doc! { "$set": { "is_deleted": false, "updated_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn soft_delete(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<Cart>(), doc! { "_id": id }).await
    }

    pub async fn count_active(&self) -> AppResult<u64> {
        common::count_active(&self.collection::<Cart>(), doc! {}).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let active_cart_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(doc! { "is_deleted": false })
                .name(ACTIVE_CART_INDEX.to_string())
                .build())
            .build();

        self.collection::<Cart>()
            .create_index(active_cart_index)
            .await?;
        Ok(())
    }
}

fn claim_filter(customer_id: &ObjectId) -> Document {
    common::active(doc! {
        "customer_id": customer_id,
        "items.0": { "$exists": true },
    })
}

fn ensure_saved(matched_count: u64) -> AppResult<()> {
    if matched_count == 0 {
        return Err(AppError::ConflictError(
            "장바구니가 이미 결제되었거나 삭제되었습니다".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_without_match_is_conflict() {
        assert!(ensure_saved(1).is_ok());
        assert!(matches!(ensure_saved(0), Err(AppError::ConflictError(_))));
    }

    #[test]
    fn test_claim_filter_requires_active_non_empty_cart() {
        let customer_id = ObjectId::new();
        let filter = claim_filter(&customer_id);

        assert_eq!(filter.get_object_id("customer_id").unwrap(), customer_id);
        assert_eq!(filter.get_document("items.0").unwrap(), &doc! { "$exists": true });
        assert_eq!(filter.get_document("is_deleted").unwrap(), &doc! { "$ne": true });
    }
}
