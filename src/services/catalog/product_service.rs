use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::catalog::{CreateProductRequest, ProductResponse, UpdateProductRequest},
        entities::catalog::Product,
    },
    errors::{AppError, AppResult},
    repositories::{
        catalog::{CategoryRepository, ProductRepository},
        common::parse_object_id,
    },
};

#[service(name = "product")]
pub struct ProductService {
    product_repo: Arc<ProductRepository>,

    category_repo: Arc<CategoryRepository>,
}

impl ProductService {
    /// 상품 생성. 상위 카테고리가 없거나 삭제되었으면 404
    pub async fn create(&self, request: CreateProductRequest) -> AppResult<ProductResponse> {
        let category_id = parse_object_id(&request.category_id)?;
        self.ensure_category(&category_id).await?;

        let product = self.product_repo
            .insert(Product::new(category_id, request.name, request.description))
            .await?;

        log::info!("📦 상품 생성: {} (카테고리 {})", product.name, category_id);
        Ok(ProductResponse::from(product))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.product_repo.count().await
    }

    pub async fn list(&self) -> AppResult<Vec<ProductResponse>> {
        let products = self.product_repo.find_all().await?;

        if products.is_empty() {
            return Err(AppError::NotFound("상품이 없습니다".to_string()));
        }
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<ProductResponse> {
        let id = parse_object_id(id)?;

        self.product_repo
            .find_by_id(&id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(not_found)
    }

    /// 카테고리를 바꾸는 경우 새 카테고리도 존재해야 합니다.
    pub async fn update(&self, id: &str, request: UpdateProductRequest) -> AppResult<ProductResponse> {
        let id = parse_object_id(id)?;

        let category_id = match request.category_id.as_deref() {
            Some(raw) => {
                let category_id = parse_object_id(raw)?;
                self.ensure_category(&category_id).await?;
                Some(category_id)
            }
            None => None,
        };

        let set = update_document(category_id, request)?;

        self.product_repo
            .update(&id, set)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.product_repo.soft_delete(&id).await? {
            return Err(not_found());
        }

        log::info!("🗑️ 상품 삭제: {}", id);
        Ok(())
    }

    async fn ensure_category(&self, category_id: &ObjectId) -> AppResult<()> {
        self.category_repo
            .find_by_id(category_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("상품을 찾을 수 없습니다".to_string())
}

fn update_document(category_id: Option<ObjectId>, request: UpdateProductRequest) -> AppResult<Document> {
    let mut set = doc! {};
    if let Some(category_id) = category_id {
        set.insert("category_id", category_id);
    }
    if let Some(name) = request.name {
        set.insert("name", name);
    }
    if let Some(description) = request.description {
        set.insert("description", description);
    }

    if set.is_empty() {
        return Err(AppError::ValidationError("수정할 항목이 없습니다".to_string()));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_collects_present_fields() {
        let category_id = ObjectId::new();
        let request = UpdateProductRequest {
            name: Some("Runner".into()),
            ..Default::default()
        };

        let set = update_document(Some(category_id), request).unwrap();

        assert_eq!(set, doc! { "category_id": category_id, "name": "Runner" });
    }

    #[test]
    fn test_update_document_rejects_empty_patch() {
        assert!(update_document(None, UpdateProductRequest::default()).is_err());
    }
}
