//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//! 도메인별로 모듈화되어 있으며, 리포지토리 조합과 비즈니스 규칙을 담당합니다.
//!
//! # Features
//!
//! - 계정: 회원가입, 관리자 생성, 프로필
//! - 인증: 비밀번호 + OTP 로그인, 세션, 비밀번호 재설정
//! - 카탈로그: 카테고리 / 상품 / 상품 옵션
//! - 커머스: 장바구니, 결제, 주문, 배송지, 배송 상태
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::AuthService, commerce::CartService};
//!
//! let auth_service = AuthService::instance();
//! let cart_service = CartService::instance();
//! ```

pub mod accounts;
pub mod auth;
pub mod notifications;
pub mod catalog;
pub mod commerce;
