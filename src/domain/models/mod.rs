//! 저장되지 않는 도메인 모델
//!
//! - [`auth`] - 인증 주체와 라우트별 인증 요구 수준
//! - [`token`] - JWT 클레임과 발급 결과

pub mod auth;
pub mod token;
