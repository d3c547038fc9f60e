//! # Authentication Configuration Module
//!
//! JWT 서명, OTP 챌린지, 비밀번호 재설정 토큰, 메일 발신자,
//! 초기 관리자 계정 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정 (프로덕션)
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="6"
//! ```
//!
//! ## 선택 환경 변수
//!
//! ```bash
//! export OTP_EXPIRY_MINUTES="2"
//! export OTP_BYPASS_CODE="123456"         # 프로덕션에서는 무시됨
//! export RESET_TOKEN_EXPIRY_MINUTES="15"
//! export MAIL_FROM="no-reply@shop.local"
//! export SEED_ADMIN_EMAIL="root@shop.local"
//! ```

use std::env;
use super::{env_non_empty, env_or, Environment};

/// JWT 서명 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명 키
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하며 경고를 남깁니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰과 세션의 유효 시간. 기본값: 6시간
    pub fn expiration_hours() -> i64 {
        env_or("JWT_EXPIRATION_HOURS", 6)
    }

    pub fn expiration_seconds() -> i64 {
        Self::expiration_hours() * 3600
    }

    pub fn issuer() -> String {
        env_non_empty("JWT_ISSUER").unwrap_or_else(|| "shop_backend".to_string())
    }
}

/// 로그인 OTP 설정
pub struct OtpConfig;

impl OtpConfig {
    /// OTP 유효 시간. 기본값: 2분
    pub fn expiry_minutes() -> i64 {
        env_or("OTP_EXPIRY_MINUTES", 2)
    }

    /// 개발/테스트용 우회 코드
    ///
    /// 프로덕션 환경에서는 설정되어 있어도 항상 `None`입니다.
    pub fn bypass_code() -> Option<String> {
        Self::bypass_code_for_env(&Environment::current(), env_non_empty("OTP_BYPASS_CODE"))
    }

    fn bypass_code_for_env(env: &Environment, configured: Option<String>) -> Option<String> {
        if env.is_production() {
            if configured.is_some() {
                log::warn!("⚠️ OTP_BYPASS_CODE는 프로덕션에서 무시됩니다");
            }
            return None;
        }
        configured
    }
}

/// 비밀번호 재설정 토큰 설정
pub struct ResetTokenConfig;

impl ResetTokenConfig {
    /// 재설정 토큰 유효 시간. 기본값: 15분
    pub fn expiry_minutes() -> i64 {
        env_or("RESET_TOKEN_EXPIRY_MINUTES", 15)
    }

    /// 메일 본문 링크에 쓰이는 프론트엔드 주소
    pub fn reset_url_base() -> String {
        env_non_empty("RESET_PASSWORD_URL")
            .unwrap_or_else(|| "http://localhost:3000/reset-password".to_string())
    }
}

/// 메일 발신 설정
pub struct MailConfig;

impl MailConfig {
    pub fn from_address() -> String {
        env_non_empty("MAIL_FROM").unwrap_or_else(|| "no-reply@shop.local".to_string())
    }
}

/// 시작 시 생성할 초기 관리자 계정
#[derive(Debug, Clone)]
pub struct SeedAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SeedAdminConfig {
    /// `SEED_ADMIN_EMAIL`과 `SEED_ADMIN_PASSWORD`가 모두 있을 때만 반환합니다.
    /// 이름이 없으면 "Administrator"를 사용합니다.
    pub fn load() -> Option<Self> {
        Self::from_parts(
            env_non_empty("SEED_ADMIN_NAME"),
            env_non_empty("SEED_ADMIN_EMAIL"),
            env::var("SEED_ADMIN_PASSWORD").ok(),
        )
    }

    fn from_parts(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Option<Self> {
        let email = email?;
        let password = password.filter(|p| !p.is_empty())?;

        Some(Self {
            name: name.unwrap_or_else(|| "Administrator".to_string()),
            email,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_code_is_ignored_in_production() {
        let code = Some("123456".to_string());

        assert_eq!(OtpConfig::bypass_code_for_env(&Environment::Production, code.clone()), None);
        assert_eq!(
            OtpConfig::bypass_code_for_env(&Environment::Development, code.clone()),
            code
        );
        assert_eq!(OtpConfig::bypass_code_for_env(&Environment::Test, None), None);
    }

    #[test]
    fn test_seed_admin_requires_email_and_password() {
        assert!(SeedAdminConfig::from_parts(None, None, Some("password1".into())).is_none());
        assert!(SeedAdminConfig::from_parts(None, Some("a@b.co".into()), None).is_none());
        assert!(SeedAdminConfig::from_parts(None, Some("a@b.co".into()), Some(String::new())).is_none());

        let seed = SeedAdminConfig::from_parts(None, Some("a@b.co".into()), Some("password1".into()))
            .unwrap();
        assert_eq!(seed.name, "Administrator");
        assert_eq!(seed.email, "a@b.co");
    }

    #[test]
    fn test_jwt_expiration_seconds_follows_hours() {
        assert_eq!(JwtConfig::expiration_seconds(), JwtConfig::expiration_hours() * 3600);
    }
}
