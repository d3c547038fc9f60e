//! 인증 및 보안 서비스 모듈
//!
//! 비밀번호 + 메일 OTP 2단계 로그인, JWT 액세스 토큰, 세션 기반 요청 인증,
//! 비밀번호 재설정을 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 세션/재설정 토큰은 SHA-256 해시로만 저장
//! - OTP는 2분간 유효하며 한 번만 사용 가능
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let auth = AuthService::instance();
//! let challenge = auth.login(request).await?;
//! ```

pub mod otp;
pub mod token_service;
pub mod auth_service;

pub use token_service::TokenService;
pub use auth_service::AuthService;
