//! JWT 액세스 토큰 서비스
//!
//! HS256으로 서명한 액세스 토큰을 발급하고 검증합니다.
//! 세션에는 원본 토큰 대신 SHA-256 해시를 저장하므로 해시 계산도 여기서 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use sha2::{Digest, Sha256};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    domain::{
        entities::accounts::AccountKind,
        models::token::{IssuedToken, TokenClaims},
    },
    errors::{AppError, AppResult},
};

/// JWT 토큰 관리 서비스
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 계정에 대한 액세스 토큰 발급
    ///
    /// 반환값의 `token_hash`는 세션 저장용이며, 원본 토큰은 클라이언트에게만 전달됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue(&self, kind: AccountKind, account_id: &ObjectId) -> AppResult<IssuedToken> {
        let access_token = sign(
            kind,
            account_id,
            &JwtConfig::secret(),
            &JwtConfig::issuer(),
            JwtConfig::expiration_hours(),
        )?;

        Ok(IssuedToken {
            token_hash: hash_token(&access_token),
            access_token,
            expires_in: JwtConfig::expiration_seconds(),
        })
    }

    /// JWT 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료되었거나 서명/형식이 잘못된 토큰
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        verify(token, &JwtConfig::secret(), &JwtConfig::issuer())
    }

    /// `Authorization` 헤더 값에서 토큰 부분만 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        extract_bearer(auth_header)
    }
}

/// 토큰 원문의 SHA-256 hex 다이제스트
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn sign(kind: AccountKind, account_id: &ObjectId, secret: &str, issuer: &str, hours: i64) -> AppResult<String> {
    let now = Utc::now();
    let expiration = now + Duration::hours(hours);

    let claims = TokenClaims {
        sub: account_id.to_hex(),
        kind,
        roles: vec![kind.role().to_string()],
        jti: Uuid::new_v4().to_string(),
        iss: issuer.to_string(),
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

fn verify(token: &str, secret: &str, issuer: &str) -> AppResult<TokenClaims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[issuer]);

    decode::<TokenClaims>(token, &decoding_key, &validation)
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
        })
}

fn extract_bearer(auth_header: &str) -> AppResult<&str> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const ISSUER: &str = "shop_backend";

    #[test]
    fn test_sign_then_verify_keeps_subject_and_role() {
        let account_id = ObjectId::new();
        let token = sign(AccountKind::Admin, &account_id, SECRET, ISSUER, 6).unwrap();

        let claims = verify(&token, SECRET, ISSUER).unwrap();

        assert_eq!(claims.sub, account_id.to_hex());
        assert_eq!(claims.kind, AccountKind::Admin);
        assert_eq!(claims.roles, vec!["admin".to_string()]);
        assert_eq!(claims.exp - claims.iat, 6 * 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = sign(AccountKind::Customer, &ObjectId::new(), SECRET, ISSUER, 6).unwrap();

        let result = verify(&token, "other-secret", ISSUER);

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = sign(AccountKind::Customer, &ObjectId::new(), SECRET, ISSUER, -1).unwrap();

        let result = verify(&token, SECRET, ISSUER);

        assert!(matches!(result, Err(AppError::AuthenticationError(msg)) if msg.contains("만료")));
    }

    #[test]
    fn test_tokens_issued_together_hash_differently() {
        let account_id = ObjectId::new();
        let first = sign(AccountKind::Customer, &account_id, SECRET, ISSUER, 6).unwrap();
        let second = sign(AccountKind::Customer, &account_id, SECRET, ISSUER, 6).unwrap();

        assert_ne!(hash_token(&first), hash_token(&second));
    }

    #[test]
    fn test_hash_token_is_sha256_hex() {
        let digest = hash_token("abc");

        assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer("Basic abc").is_err());
        assert!(extract_bearer("Bearer ").is_err());
        assert!(extract_bearer("abc").is_err());
    }
}
