use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::AccountKind;
use crate::utils::time::plus_minutes;

/// 진행 중인 로그인 OTP 챌린지
///
/// 발급되지 않았거나 이미 사용된 경우 모든 필드가 비어 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtpSecurity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime>,
}

/// OTP 검증 실패 사유
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OtpRejection {
    #[error("OTP가 만료되었습니다")]
    Expired,

    #[error("올바른 OTP를 입력해주세요")]
    Mismatch,
}

impl OtpSecurity {
    pub fn issue(otp: String, otp_ref: String, now: DateTime, ttl_minutes: i64) -> Self {
        Self {
            otp: Some(otp),
            otp_ref: Some(otp_ref),
            generated_at: Some(now),
            expired_at: Some(plus_minutes(now, ttl_minutes)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.otp.is_some() && self.otp_ref.is_some()
    }

    /// 제출된 코드를 검사합니다.
    ///
    /// 만료 검사가 코드 비교보다 먼저입니다. `bypass`는 설정된 경우에만
    /// 저장된 코드 대신 허용됩니다.
    pub fn verify(&self, submitted: &str, bypass: Option<&str>, now: DateTime) -> Result<(), OtpRejection> {
        let expired_at = self.expired_at.ok_or(OtpRejection::Expired)?;
        if now > expired_at {
            return Err(OtpRejection::Expired);
        }

        let matches_stored = self.otp.as_deref() == Some(submitted);
        let matches_bypass = bypass.is_some_and(|code| code == submitted);

        if matches_stored || matches_bypass {
            Ok(())
        } else {
            Err(OtpRejection::Mismatch)
        }
    }
}

/// 계정의 로그인 자격 증명
///
/// `(account_kind, account_id)` 쌍마다 하나만 존재합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub account_kind: AccountKind,

    pub account_id: ObjectId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(default)]
    pub security: OtpSecurity,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Credentials {
    pub fn new(account_kind: AccountKind, account_id: ObjectId, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            account_kind,
            account_id,
            password_hash: Some(password_hash),
            security: OtpSecurity::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime {
        DateTime::from_millis(millis)
    }

    #[test]
    fn test_issue_sets_two_minute_window() {
        let security = OtpSecurity::issue("482913".into(), "AB12CD".into(), at(0), 2);

        assert!(security.is_pending());
        assert_eq!(security.expired_at, Some(at(120_000)));
    }

    #[test]
    fn test_verify_accepts_stored_code_until_expiry() {
        let security = OtpSecurity::issue("482913".into(), "AB12CD".into(), at(0), 2);

        assert_eq!(security.verify("482913", None, at(60_000)), Ok(()));
        assert_eq!(security.verify("482913", None, at(120_000)), Ok(()));
        assert_eq!(security.verify("482913", None, at(120_001)), Err(OtpRejection::Expired));
    }

    #[test]
    fn test_verify_rejects_wrong_code() {
        let security = OtpSecurity::issue("482913".into(), "AB12CD".into(), at(0), 2);

        assert_eq!(security.verify("111111", None, at(1_000)), Err(OtpRejection::Mismatch));
    }

    #[test]
    fn test_bypass_code_only_when_configured() {
        let security = OtpSecurity::issue("482913".into(), "AB12CD".into(), at(0), 2);

        assert_eq!(security.verify("123456", Some("123456"), at(1_000)), Ok(()));
        assert_eq!(security.verify("123456", None, at(1_000)), Err(OtpRejection::Mismatch));
        // 만료된 챌린지는 우회 코드로도 통과할 수 없습니다
        assert_eq!(security.verify("123456", Some("123456"), at(200_000)), Err(OtpRejection::Expired));
    }

    #[test]
    fn test_cleared_challenge_is_rejected() {
        let security = OtpSecurity::default();

        assert!(!security.is_pending());
        assert_eq!(security.verify("482913", None, at(0)), Err(OtpRejection::Expired));
    }
}
