use serde::{Deserialize, Serialize};
use crate::domain::entities::accounts::AccountKind;

/// HS256 액세스 토큰 클레임
///
/// `jti`가 토큰마다 달라 같은 초에 발급된 토큰도 서로 다른 세션 해시를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 계정 ID (hex)
    pub sub: String,
    pub kind: AccountKind,
    pub roles: Vec<String>,
    pub jti: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// 서명된 토큰과 만료 정보
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_hash: String,
    pub expires_in: i64,
}
