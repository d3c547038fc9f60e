//! 소프트 삭제 컬렉션 공통 쿼리
//!
//! 모든 엔티티 컬렉션은 `is_deleted` 플래그를 가지며 조회는 삭제되지 않은
//! 문서만 대상으로 합니다. 리포지토리는 `self.collection::<T>()`을 넘겨 이 함수들을 호출합니다.

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::ReturnDocument,
    results::InsertOneResult,
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};
use crate::errors::{AppError, AppResult};

pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

/// `extra` 조건에 "삭제되지 않음"을 더한 필터
pub fn active(mut extra: Document) -> Document {
    extra.insert("is_deleted", doc! { "$ne": true });
    extra
}

pub fn inserted_object_id(result: InsertOneResult) -> AppResult<ObjectId> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))
}

pub async fn insert<T>(collection: &Collection<T>, entity: &T) -> AppResult<ObjectId>
where
    T: Serialize + Send + Sync,
{
    let result = collection.insert_one(entity).await?;
    inserted_object_id(result)
}

pub async fn find_active_by_id<T>(collection: &Collection<T>, id: &ObjectId) -> AppResult<Option<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    Ok(collection.find_one(active(doc! { "_id": id })).await?)
}

/// 최신순 목록
pub async fn find_active<T>(collection: &Collection<T>, filter: Document) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let cursor = collection
        .find(active(filter))
        .sort(doc! { "created_at": -1 })
        .await?;

    Ok(cursor.try_collect().await?)
}

pub async fn count_active<T>(collection: &Collection<T>, filter: Document) -> AppResult<u64>
where
    T: Send + Sync,
{
    Ok(collection.count_documents(active(filter)).await?)
}

/// 삭제되지 않은 문서에 `$set`을 적용하고 변경 후 문서를 반환합니다.
pub async fn update_active<T>(
    collection: &Collection<T>,
    filter: Document,
    mut set: Document,
) -> AppResult<Option<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    set.insert("updated_at", DateTime::now());

    Ok(collection
        .find_one_and_update(active(filter), doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?)
}

/// 소프트 삭제. 이미 삭제되었거나 없으면 `false`
pub async fn soft_delete<T>(collection: &Collection<T>, filter: Document) -> AppResult<bool>
where
    T: Send + Sync,
{
    let result = collection
        .update_one(
            active(filter),
            doc! { "$set": { "is_deleted": true, "updated_at": DateTime::now() } },
        )
        .await?;

    Ok(result.modified_count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(matches!(parse_object_id("xyz"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_active_filter_excludes_deleted() {
        let filter = active(doc! { "customer_id": "c1" });

        assert_eq!(filter.get_str("customer_id").unwrap(), "c1");
        assert_eq!(filter.get_document("is_deleted").unwrap(), &doc! { "$ne": true });
    }
}
