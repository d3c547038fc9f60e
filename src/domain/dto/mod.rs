//! 요청/응답 DTO
//!
//! 요청 DTO는 `serde`로 역직렬화하면서 공백을 정리하고 `validator`로 검증합니다.
//! 응답 DTO는 엔티티에서 `From`으로 만들어지며 ID는 hex 문자열, 시각은 RFC 3339입니다.

pub mod common;
pub mod auth;
pub mod catalog;
pub mod commerce;

pub use common::{ApiResponse, CountResponse};
