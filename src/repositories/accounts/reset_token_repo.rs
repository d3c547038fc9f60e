use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::accounts::{AccountKind, ResetToken},
    errors::AppResult,
    repositories::common,
};

#[repository(name = "reset_token", collection = "reset_tokens")]
pub struct ResetTokenRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ResetTokenRepository {
    pub async fn insert(&self, mut token: ResetToken) -> AppResult<ResetToken> {
        token.id = Some(common::insert(&self.collection::<ResetToken>(), &token).await?);
        Ok(token)
    }

    pub async fn find_active_by_hash(&self, token_hash: &str) -> AppResult<Option<ResetToken>> {
        Ok(self.collection::<ResetToken>()
            .find_one(common::active(doc! { "token_hash": token_hash }))
            .await?)
    }

    /// 토큰을 사용 처리합니다. 다른 요청이 먼저 사용했으면 `false`
    pub async fn consume(&self, id: &ObjectId) -> AppResult<bool> {
        common::soft_delete(&self.collection::<ResetToken>(), doc! { "_id": id }).await
    }

    /// 재설정 도중 실패하면 사용 처리한 토큰을 되살립니다.
    pub async fn restore(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<ResetToken>()
            .update_one(
                doc! { "_id": id, "is_deleted": true },
                doc! { "$set": { "is_deleted": false, "updated_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// 새 토큰을 발급하기 전에 계정의 남은 토큰을 모두 무효화합니다.
    pub async fn revoke_for_account(&self, kind: AccountKind, account_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<ResetToken>()
            .update_many(
                common::active(doc! { "account_kind": kind.as_str(), "account_id": account_id }),
                doc! { "$set": { "is_deleted": true, "updated_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        self.collection::<ResetToken>()
            .create_index(token_index)
            .await?;
        Ok(())
    }
}
