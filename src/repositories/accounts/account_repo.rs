//! 관리자/고객 계정 리포지토리
//!
//! 두 컬렉션은 스키마가 같으므로 [`AccountStore`] 트레이트 하나로 다루고,
//! 서비스는 [`AccountKind`]로 구현체를 고릅니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::accounts::{Account, AccountKind},
    errors::{AppError, AppResult},
    repositories::common,
};

#[async_trait]
pub trait AccountStore: Send + Sync {
    fn kind(&self) -> AccountKind;

    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    async fn find_active_by_id(&self, id: &ObjectId) -> AppResult<Option<Account>>;

    /// 이메일 중복이면 409
    async fn insert(&self, account: Account) -> AppResult<Account>;

    async fn touch_last_login(&self, id: &ObjectId, at: DateTime) -> AppResult<()>;
}

async fn find_by_email(collection: &Collection<Account>, email: &str) -> AppResult<Option<Account>> {
    Ok(collection.find_one(common::active(doc! { "email": email })).await?)
}

/// 사전 조회는 빠른 거절용이고, 동시 가입은 `email_unique` 인덱스가 409로 막습니다.
async fn insert_unique(collection: &Collection<Account>, mut account: Account) -> AppResult<Account> {
    if collection.find_one(doc! { "email": &account.email }).await?.is_some() {
        return Err(email_taken());
    }

    let id = common::insert(collection, &account)
        .await
        .map_err(|e| match e {
            AppError::ConflictError(_) => email_taken(),
            other => other,
        })?;

    account.id = Some(id);
    Ok(account)
}

fn email_taken() -> AppError {
    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
}

async fn touch(collection: &Collection<Account>, id: &ObjectId, at: DateTime) -> AppResult<()> {
    collection
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "last_login_at": at, "updated_at": at } },
        )
        .await?;
    Ok(())
}

async fn email_index(collection: &Collection<Account>) -> AppResult<()> {
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder()
            .unique(true)
            .name("email_unique".to_string())
            .build())
        .build();

    collection.create_index(email_index).await?;
    Ok(())
}

#[repository(name = "admin", collection = "admins")]
pub struct AdminRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl AdminRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        email_index(&self.collection::<Account>()).await
    }
}

#[async_trait]
impl AccountStore for AdminRepository {
    fn kind(&self) -> AccountKind {
        AccountKind::Admin
    }

    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        find_by_email(&self.collection::<Account>(), email).await
    }

    async fn find_active_by_id(&self, id: &ObjectId) -> AppResult<Option<Account>> {
        common::find_active_by_id(&self.collection::<Account>(), id).await
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        insert_unique(&self.collection::<Account>(), account).await
    }

    async fn touch_last_login(&self, id: &ObjectId, at: DateTime) -> AppResult<()> {
        touch(&self.collection::<Account>(), id, at).await
    }
}

#[repository(name = "customer", collection = "customers")]
pub struct CustomerRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl CustomerRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        email_index(&self.collection::<Account>()).await
    }
}

#[async_trait]
impl AccountStore for CustomerRepository {
    fn kind(&self) -> AccountKind {
        AccountKind::Customer
    }

    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        find_by_email(&self.collection::<Account>(), email).await
    }

    async fn find_active_by_id(&self, id: &ObjectId) -> AppResult<Option<Account>> {
        common::find_active_by_id(&self.collection::<Account>(), id).await
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        insert_unique(&self.collection::<Account>(), account).await
    }

    async fn touch_last_login(&self, id: &ObjectId, at: DateTime) -> AppResult<()> {
        touch(&self.collection::<Account>(), id, at).await
    }
}
