//! # HTTP 핸들러
//!
//! 핸들러는 요청 DTO를 검증하고 서비스 싱글톤을 호출한 뒤
//! 결과를 `ApiResponse` 봉투에 담아 돌려줍니다. 실패는 모두 `AppError`가
//! `ResponseError`로 변환합니다.
//!
//! 라우트별 인증 수준은 라우트 매크로의 `wrap` 인자로 붙입니다.
//! 같은 경로에서 조회는 공개, 변경은 관리자 전용인 카탈로그 때문에
//! 스코프 단위가 아니라 라우트 단위로 미들웨어를 적용합니다.
//!
//! ```text
//! HTTP ─▶ AuthMiddleware (route wrap) ─▶ handler ─▶ Service ─▶ Repository ─▶ MongoDB/Redis
//! ```

pub mod auth;
pub mod admins;
pub mod categories;
pub mod products;
pub mod product_variants;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod addresses;
pub mod shipments;
