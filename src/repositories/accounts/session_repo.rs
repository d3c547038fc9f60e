use std::sync::Arc;
use futures_util::TryStreamExt;
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
    domain::entities::accounts::{AccountKind, Session},
    errors::AppResult,
    repositories::common,
};

#[repository(name = "session", collection = "sessions")]
pub struct SessionRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl SessionRepository {
    pub async fn insert(&self, mut session: Session) -> AppResult<Session> {
        session.id = Some(common::insert(&self.collection::<Session>(), &session).await?);
        Ok(session)
    }

    pub async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        Ok(self.collection::<Session>()
            .find_one(doc! { "token_hash": token_hash })
            .await?)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Session>> {
        Ok(self.collection::<Session>()
            .find_one(doc! { "_id": id })
            .await?)
    }

    /// 세션 하나를 `expired`로 바꿉니다. 이미 만료된 세션이면 `false`
    pub async fn expire(&self, id: &ObjectId, now: DateTime) -> AppResult<bool> {
        let result = self.collection::<Session>()
            .update_one(
                doc! { "_id": id, "status": "current" },
                doc! { "$set": { "status": "expired", "expired_at": now, "updated_at": now } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// 계정의 현재 세션을 모두 만료시키고, 캐시 무효화를 위해 토큰 해시를 반환합니다.
    pub async fn expire_all_for_account(&self, kind: AccountKind, account_id: &ObjectId, now: DateTime) -> AppResult<Vec<String>> {
        let filter = doc! {
            "account_kind": kind.as_str(),
            "account_id": account_id,
            "status": "current",
        };

        let sessions: Vec<Session> = self.collection::<Session>()
            .find(filter.clone())
            .await?
            .try_collect()
            .await?;

        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<Session>()
            .update_many(
                filter,
                doc! { "$set": { "status": "expired", "expired_at": now, "updated_at": now } },
            )
            .await?;

        Ok(sessions.into_iter().map(|s| s.token_hash).collect())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        let account_index = IndexModel::builder()
            .keys(doc! { "account_kind": 1, "account_id": 1, "status": 1 })
            .options(IndexOptions::builder()
                .name("account_status".to_string())
                .build())
            .build();

        self.collection::<Session>()
            .create_indexes([token_index, account_index])
            .await?;
        Ok(())
    }
}
