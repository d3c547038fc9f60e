use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, DateTime, Document},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::accounts::{AccountKind, Credentials, OtpSecurity},
    errors::{AppError, AppResult},
    repositories::common,
};

#[repository(name = "credentials", collection = "credentials")]
pub struct CredentialsRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl CredentialsRepository {
    pub async fn insert(&self, mut credentials: Credentials) -> AppResult<Credentials> {
        credentials.id = Some(common::insert(&self.collection::<Credentials>(), &credentials).await?);
        Ok(credentials)
    }

    pub async fn find_by_account(&self, kind: AccountKind, account_id: &ObjectId) -> AppResult<Option<Credentials>> {
        Ok(self.collection::<Credentials>()
            .find_one(doc! { "account_kind": kind.as_str(), "account_id": account_id })
            .await?)
    }

    /// OTP 참조 코드로 자격 증명을 찾습니다.
    ///
    /// 참조 코드는 발급 시 중복을 피하지만, 겹치더라도 관리자 자격 증명이 먼저입니다.
    pub async fn find_by_otp_ref(&self, otp_ref: &str) -> AppResult<Option<Credentials>> {
        Ok(self.collection::<Credentials>()
            .find_one(doc! { "security.otp_ref": otp_ref })
            .sort(doc! { "account_kind": 1 })
            .await?)
    }

    pub async fn otp_ref_in_use(&self, otp_ref: &str) -> AppResult<bool> {
        let count = self.collection::<Credentials>()
            .count_documents(doc! { "security.otp_ref": otp_ref })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    pub async fn set_security(&self, id: &ObjectId, security: &OtpSecurity) -> AppResult<()> {
        let security = to_bson(security)?;

        self.collection::<Credentials>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "security": security, "updated_at": DateTime::now() } },
            )
            .await?;
        Ok(())
    }

    /// 사용된 OTP 챌린지를 비웁니다.
    ///
    /// 제출된 참조 코드가 아직 저장되어 있을 때만 지우므로, 같은 OTP로
    /// 동시에 들어온 두 번째 요청은 `false`를 받습니다.
    pub async fn consume_otp(&self, id: &ObjectId, otp_ref: &str) -> AppResult<bool> {
        let result = self.collection::<Credentials>()
            .update_one(
                consume_otp_filter(id, otp_ref),
                doc! { "$set": { "security": {}, "updated_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    /// 해당 계정 하나의 비밀번호만 바꿉니다.
    pub async fn update_password(&self, kind: AccountKind, account_id: &ObjectId, password_hash: &str) -> AppResult<()> {
        let result = self.collection::<Credentials>()
            .update_one(
                doc! { "account_kind": kind.as_str(), "account_id": account_id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "security": {},
                    "updated_at": DateTime::now(),
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("계정 자격 증명을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let account_index = IndexModel::builder()
            .keys(doc! { "account_kind": 1, "account_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("account_unique".to_string())
                .build())
            .build();

        let otp_ref_index = IndexModel::builder()
            .keys(doc! { "security.otp_ref": 1 })
            .options(IndexOptions::builder()
                .sparse(true)
                .name("otp_ref".to_string())
                .build())
            .build();

        self.collection::<Credentials>()
            .create_indexes([account_index, otp_ref_index])
            .await?;
        Ok(())
    }
}

/// 이미 비워진 챌린지에는 맞지 않는 조건
fn consume_otp_filter(id: &ObjectId, otp_ref: &str) -> Document {
    doc! { "_id": id, "security.otp_ref": otp_ref }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_otp_requires_pending_reference() {
        let id = ObjectId::new();
        let filter = consume_otp_filter(&id, "aB3xYz");

        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        assert_eq!(filter.get_str("security.otp_ref").unwrap(), "aB3xYz");
    }
}
