//! MongoDB에 저장되는 도메인 엔티티
//!
//! 모든 엔티티는 `_id: Option<ObjectId>`, `created_at`/`updated_at`
//! (`bson::DateTime`)을 가지며, 삭제는 `is_deleted` 플래그로 처리합니다.
//! 비즈니스 규칙(장바구니 합계, OTP 만료, 배송 상태 전이)은 엔티티 메서드로
//! 표현되어 저장소 없이 테스트됩니다.

pub mod accounts;
pub mod catalog;
pub mod commerce;
