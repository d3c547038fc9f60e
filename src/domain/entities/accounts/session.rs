use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use super::AccountKind;
use crate::utils::time::{plus_hours, seconds_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Current,
    Expired,
}

/// 로그인 세션
///
/// 원본 토큰 대신 SHA-256 해시(`token_hash`)만 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub account_kind: AccountKind,

    pub account_id: ObjectId,

    pub token_hash: String,

    pub status: SessionStatus,

    pub login_at: DateTime,

    pub expire_at: DateTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Session {
    pub fn open(
        account_kind: AccountKind,
        account_id: ObjectId,
        token_hash: String,
        now: DateTime,
        lifetime_hours: i64,
    ) -> Self {
        Self {
            id: None,
            account_kind,
            account_id,
            token_hash,
            status: SessionStatus::Current,
            login_at: now,
            expire_at: plus_hours(now, lifetime_hours),
            expired_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// `current` 상태이고 `expire_at`이 지나지 않았는지
    pub fn is_active_at(&self, now: DateTime) -> bool {
        self.status == SessionStatus::Current && self.expire_at >= now
    }

    /// 상태는 `current`지만 유효 시간이 지나 만료 처리가 필요한지
    pub fn is_stale_at(&self, now: DateTime) -> bool {
        self.status == SessionStatus::Current && self.expire_at < now
    }

    pub fn remaining_seconds(&self, now: DateTime) -> i64 {
        seconds_until(now, self.expire_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(now: DateTime) -> Session {
        Session::open(AccountKind::Customer, ObjectId::new(), "hash".into(), now, 6)
    }

    #[test]
    fn test_session_lifetime_is_six_hours() {
        let now = DateTime::from_millis(0);
        let session = session_at(now);

        assert_eq!(session.remaining_seconds(now), 21_600);
        assert!(session.is_active_at(now));
    }

    #[test]
    fn test_session_past_expiry_is_stale() {
        let session = session_at(DateTime::from_millis(0));
        let later = DateTime::from_millis(21_600_001);

        assert!(!session.is_active_at(later));
        assert!(session.is_stale_at(later));
        assert_eq!(session.remaining_seconds(later), 0);
    }

    #[test]
    fn test_expired_session_is_never_active() {
        let mut session = session_at(DateTime::from_millis(0));
        session.status = SessionStatus::Expired;

        assert!(!session.is_active_at(DateTime::from_millis(1)));
        assert!(!session.is_stale_at(DateTime::from_millis(1)));
    }
}
