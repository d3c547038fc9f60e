use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use super::AccountKind;
use crate::utils::time::plus_minutes;

/// 비밀번호 재설정 토큰 (해시로 저장, 일회용)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub token_hash: String,

    pub account_kind: AccountKind,

    pub account_id: ObjectId,

    pub expires_at: DateTime,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ResetToken {
    pub fn new(
        token_hash: String,
        account_kind: AccountKind,
        account_id: ObjectId,
        now: DateTime,
        ttl_minutes: i64,
    ) -> Self {
        Self {
            id: None,
            token_hash,
            account_kind,
            account_id,
            expires_at: plus_minutes(now, ttl_minutes),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_usable_at(&self, now: DateTime) -> bool {
        !self.is_deleted && now <= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_token_window() {
        let now = DateTime::from_millis(0);
        let token = ResetToken::new("h".into(), AccountKind::Admin, ObjectId::new(), now, 15);

        assert!(token.is_usable_at(DateTime::from_millis(15 * 60_000)));
        assert!(!token.is_usable_at(DateTime::from_millis(15 * 60_000 + 1)));
    }

    #[test]
    fn test_consumed_token_is_unusable() {
        let now = DateTime::from_millis(0);
        let mut token = ResetToken::new("h".into(), AccountKind::Customer, ObjectId::new(), now, 15);
        token.is_deleted = true;

        assert!(!token.is_usable_at(now));
    }
}
