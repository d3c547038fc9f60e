//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 레코드와 그 규칙
//! ├── dto       - HTTP 요청/응답 계약
//! └── models    - 저장되지 않는 인증 주체와 토큰 클레임
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```
//!
//! ## 엔티티 구성
//!
//! | 영역 | 엔티티 | 컬렉션 |
//! |------|--------|--------|
//! | 계정 | `Account` | `admins`, `customers` |
//! | 인증 | `Credentials`, `Session`, `ResetToken` | `credentials`, `sessions`, `reset_tokens` |
//! | 카탈로그 | `Category`, `Product`, `ProductVariant` | `categories`, `products`, `product_variants` |
//! | 주문 | `Cart`, `Payment`, `Order`, `Address`, `Shipment` | `carts`, `payments`, `orders`, `addresses`, `shipment_statuses` |

pub mod entities;
pub mod dto;
pub mod models;
