//! HTTP 미들웨어
//!
//! Bearer 토큰과 세션을 검증하는 인증 미들웨어를 제공합니다.
//! 라우트 스코프마다 필요한 인증 수준(필수/선택)과 역할(admin/customer)을 지정합니다.

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
