//! # Core Framework Module
//!
//! 서비스 전반이 공유하는 의존성 주입 컨테이너를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 조회
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 등록
//! - **순환 의존성 감지**: 생성 중인 타입을 추적
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use singleton_macro::{repository, service};
//!
//! #[repository(name = "category", collection = "categories")]
//! pub struct CategoryRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "category")]
//! pub struct CategoryService {
//!     category_repo: Arc<CategoryRepository>,
//! }
//!
//! let categories = CategoryService::instance();
//! ```
//!
//! `Database`, `RedisClient`처럼 매크로로 만들 수 없는 인프라 객체는
//! 시작 시 `ServiceLocator::set()`으로 직접 등록합니다.
//!
//! ## 트러블슈팅
//!
//! ### 순환 참조 감지
//! ```text
//! ❌ 순환 의존성 감지: CheckoutService
//! panic: Circular dependency detected: CheckoutService is already being initialized
//! ```
//! **해결**: 서비스 계층을 단방향 의존성으로 재구성
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: MailService. Make sure it's registered...
//! ```
//! **해결**: `#[service]` 매크로 적용 또는 `ServiceLocator::set()` 으로 수동 등록

pub mod registry;

pub use registry::*;
