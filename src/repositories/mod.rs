//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로로 싱글톤이 되는 리포지토리들을 제공합니다.
//! MongoDB가 주 저장소이며, 카탈로그 단건 조회는 Redis에 캐시합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::catalog::CategoryRepository;
//!
//! let categories = CategoryRepository::instance();
//! let category = categories.find_by_id(&id).await?;
//! ```

pub mod common;
pub mod accounts;
pub mod catalog;
pub mod commerce;
