//! 카탈로그 엔티티: 카테고리 → 상품 → 상품 옵션

pub mod category;
pub mod product;
pub mod product_variant;

pub use category::Category;
pub use product::Product;
pub use product_variant::ProductVariant;
