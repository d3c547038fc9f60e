use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::catalog::{CreateProductVariantRequest, ProductVariantResponse, UpdateProductVariantRequest},
        entities::catalog::ProductVariant,
    },
    errors::{AppError, AppResult},
    repositories::{
        catalog::{ProductRepository, ProductVariantRepository},
        common::parse_object_id,
    },
};

/// 상품 옵션(사이즈/색상/재고/가격) 서비스
#[service(name = "product_variant")]
pub struct ProductVariantService {
    variant_repo: Arc<ProductVariantRepository>,

    product_repo: Arc<ProductRepository>,
}

impl ProductVariantService {
    pub async fn create(&self, request: CreateProductVariantRequest) -> AppResult<ProductVariantResponse> {
        let product_id = parse_object_id(&request.product_id)?;
        self.ensure_product(&product_id).await?;

        let variant = self.variant_repo
            .insert(ProductVariant::new(
                product_id,
                request.size,
                request.color,
                request.stock,
                request.price,
            ))
            .await?;

        log::info!(
            "🏷️ 상품 옵션 생성: {} {}/{} 재고 {}",
            product_id, variant.size, variant.color, variant.stock
        );
        Ok(ProductVariantResponse::from(variant))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.variant_repo.count().await
    }

    pub async fn list(&self) -> AppResult<Vec<ProductVariantResponse>> {
        let variants = self.variant_repo.find_all().await?;

        if variants.is_empty() {
            return Err(AppError::NotFound("상품 옵션이 없습니다".to_string()));
        }
        Ok(variants.into_iter().map(ProductVariantResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<ProductVariantResponse> {
        self.find_active(&parse_object_id(id)?)
            .await
            .map(ProductVariantResponse::from)
    }

    /// 장바구니/결제에서 쓰는 엔티티 조회, 없으면 404
    pub async fn find_active(&self, id: &ObjectId) -> AppResult<ProductVariant> {
        self.variant_repo
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(&self, id: &str, request: UpdateProductVariantRequest) -> AppResult<ProductVariantResponse> {
        let id = parse_object_id(id)?;

        let product_id = match request.product_id.as_deref() {
            Some(raw) => {
                let product_id = parse_object_id(raw)?;
                self.ensure_product(&product_id).await?;
                Some(product_id)
            }
            None => None,
        };

        let set = update_document(product_id, request)?;

        self.variant_repo
            .update(&id, set)
            .await?
            .map(ProductVariantResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.variant_repo.soft_delete(&id).await? {
            return Err(not_found());
        }

        log::info!("🗑️ 상품 옵션 삭제: {}", id);
        Ok(())
    }

    async fn ensure_product(&self, product_id: &ObjectId) -> AppResult<()> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("상품 옵션을 찾을 수 없습니다".to_string())
}

fn update_document(product_id: Option<ObjectId>, request: UpdateProductVariantRequest) -> AppResult<Document> {
    let mut set = doc! {};
    if let Some(product_id) = product_id {
        set.insert("product_id", product_id);
    }
    if let Some(size) = request.size {
        set.insert("size", size);
    }
    if let Some(color) = request.color {
        set.insert("color", color);
    }
    if let Some(stock) = request.stock {
        set.insert("stock", stock);
    }
    // 가격은 문자열로 저장
    if let Some(price) = request.price {
        set.insert("price", price.to_string());
    }

    if set.is_empty() {
        return Err(AppError::ValidationError("수정할 항목이 없습니다".to_string()));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_update_document_stores_price_as_string() {
        let request = UpdateProductVariantRequest {
            stock: Some(7),
            price: Some(Decimal::from_str("499.50").unwrap()),
            ..Default::default()
        };

        let set = update_document(None, request).unwrap();

        assert_eq!(set, doc! { "stock": 7_i64, "price": "499.50" });
    }

    #[test]
    fn test_update_document_rejects_empty_patch() {
        assert!(update_document(None, UpdateProductVariantRequest::default()).is_err());
    }
}
