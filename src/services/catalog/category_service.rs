use std::sync::Arc;
use mongodb::bson::{doc, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::catalog::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
        entities::catalog::Category,
    },
    errors::{AppError, AppResult},
    repositories::{catalog::CategoryRepository, common::parse_object_id},
};

#[service(name = "category")]
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
}

impl CategoryService {
    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        let category = self.category_repo.insert(Category::new(request.name)).await?;

        log::info!("📁 카테고리 생성: {}", category.name);
        Ok(CategoryResponse::from(category))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.category_repo.count().await
    }

    /// 비어 있으면 404
    pub async fn list(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.category_repo.find_all().await?;

        if categories.is_empty() {
            return Err(AppError::NotFound("카테고리가 없습니다".to_string()));
        }
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<CategoryResponse> {
        self.find_active(id).await.map(CategoryResponse::from)
    }

    /// 삭제되지 않은 카테고리 엔티티, 없으면 404
    pub async fn find_active(&self, id: &str) -> AppResult<Category> {
        let id = parse_object_id(id)?;

        self.category_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    pub async fn update(&self, id: &str, request: UpdateCategoryRequest) -> AppResult<CategoryResponse> {
        let id = parse_object_id(id)?;
        let set = update_document(request)?;

        self.category_repo
            .update(&id, set)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.category_repo.soft_delete(&id).await? {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
        }

        log::info!("🗑️ 카테고리 삭제: {}", id);
        Ok(())
    }
}

fn update_document(request: UpdateCategoryRequest) -> AppResult<Document> {
    let mut set = doc! {};
    if let Some(name) = request.name {
        set.insert("name", name);
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
    fn test_update_document_requires_a_field() {
        assert!(matches!(
            update_document(UpdateCategoryRequest::default()),
            Err(AppError::ValidationError(_))
        ));

        let set = update_document(UpdateCategoryRequest { name: Some("Shoes".into()) }).unwrap();
        assert_eq!(set, doc! { "name": "Shoes" });
    }
}
