//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 타입이 있는 접근자로 제공합니다.
//! 모든 접근자는 기본값을 가지며, 잘못된 값은 경고 로그와 함께 기본값으로 대체됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터 저장소, 미들웨어, 상거래 설정
//! - [`auth_config`] - JWT, OTP, 비밀번호 재설정, 메일, 초기 관리자 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig, OtpConfig};
//!
//! let env = Environment::current();
//! let addr = ServerConfig::bind_address();
//!
//! let secret = JwtConfig::secret();
//! let otp_ttl = OtpConfig::expiry_minutes();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="shop"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! # 인증
//! export JWT_SECRET="change-me"
//! export JWT_EXPIRATION_HOURS="6"
//! export OTP_EXPIRY_MINUTES="2"
//! export RESET_TOKEN_EXPIRY_MINUTES="15"
//!
//! # 초기 관리자 (선택)
//! export SEED_ADMIN_NAME="Root"
//! export SEED_ADMIN_EMAIL="root@shop.local"
//! export SEED_ADMIN_PASSWORD="change-me-please"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::env;
use std::str::FromStr;

/// 환경 변수를 파싱하고, 없거나 잘못된 경우 기본값을 반환합니다.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// 비어 있지 않은 문자열 환경 변수
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
