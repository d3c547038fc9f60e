//! 카탈로그 리포지토리
//!
//! 카테고리와 상품은 단건 조회를 Redis에 10분간 캐시하고 변경 시 무효화합니다.

pub mod category_repo;
pub mod product_repo;
pub mod product_variant_repo;

pub use category_repo::CategoryRepository;
pub use product_repo::ProductRepository;
pub use product_variant_repo::{ProductVariantRepository, StockLedger};
