use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::entities::catalog::{Category, Product, ProductVariant};
use crate::utils::time::to_chrono;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name,
            created_at: to_chrono(category.created_at),
            updated_at: to_chrono(category.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            category_id: product.category_id.to_hex(),
            name: product.name,
            description: product.description,
            created_at: to_chrono(product.created_at),
            updated_at: to_chrono(product.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductVariantResponse {
    pub id: String,
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub stock: i64,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductVariant> for ProductVariantResponse {
    fn from(variant: ProductVariant) -> Self {
        Self {
            id: variant.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: variant.product_id.to_hex(),
            size: variant.size,
            color: variant.color,
            stock: variant.stock,
            price: variant.price,
            created_at: to_chrono(variant.created_at),
            updated_at: to_chrono(variant.updated_at),
        }
    }
}
