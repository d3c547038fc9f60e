use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::accounts::{Account, AccountKind, Session, SessionStatus};
use crate::utils::time::{to_chrono, to_chrono_opt};

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub kind: AccountKind,
    pub name: String,
    pub email: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountResponse {
    pub fn from_account(kind: AccountKind, account: Account) -> Self {
        Self {
            id: account.id.map(|id| id.to_hex()).unwrap_or_default(),
            kind,
            name: account.name,
            email: account.email,
            last_login_at: to_chrono_opt(account.last_login_at),
            created_at: to_chrono(account.created_at),
            updated_at: to_chrono(account.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub status: SessionStatus,
    pub login_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.map(|id| id.to_hex()).unwrap_or_default(),
            status: session.status,
            login_at: to_chrono(session.login_at),
            expire_at: to_chrono(session.expire_at),
        }
    }
}

/// 로그인 1단계 결과: 메일로 발송된 OTP의 참조 코드
#[derive(Debug, Clone, Serialize)]
pub struct OtpChallengeResponse {
    pub message: String,
    pub otp_reference: String,
    pub expires_at: DateTime<Utc>,
}

/// 로그인 2단계 결과
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub session: SessionResponse,
    pub account: AccountResponse,
}

impl LoginResponse {
    pub fn bearer(access_token: String, expires_in: i64, session: Session, account: AccountResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            session: SessionResponse::from(session),
            account,
        }
    }
}

/// "who am I" 응답
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub account: AccountResponse,
    pub session: SessionResponse,
}
