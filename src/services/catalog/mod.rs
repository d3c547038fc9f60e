//! 카탈로그 서비스: 카테고리, 상품, 상품 옵션
//!
//! 쓰기 작업은 관리자 전용이며(라우트에서 강제), 읽기는 누구나 가능합니다.
//! 모든 삭제는 소프트 삭제입니다.

pub mod category_service;
pub mod product_service;
pub mod product_variant_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use product_variant_service::ProductVariantService;
