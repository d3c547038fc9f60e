//! 에러 처리 모듈
//!
//! [`errors::AppError`]와 [`errors::AppResult`]를 제공합니다.

pub mod errors;

pub use errors::{is_duplicate_key, AppError, AppResult, ErrorContext};
