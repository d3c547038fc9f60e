//! 쇼핑몰 백엔드
//!
//! 관리자와 고객 두 종류의 계정을 가진 전자상거래 REST API입니다.
//! 비밀번호 + 이메일 OTP 2단계 로그인, 세션 기반 Bearer 토큰,
//! 카탈로그, 장바구니, 결제/주문, 배송지, 배송 상태를 제공합니다.
//!
//! # Features
//!
//! - **계정**: 고객 가입, 관리자 생성, 시작 시 초기 관리자 시드
//! - **인증**: OTP 로그인, 세션 만료/로그아웃, 비밀번호 재설정 메일
//! - **카탈로그**: 카테고리 → 상품 → 상품 옵션(가격, 재고)
//! - **주문**: 장바구니 결제와 바로 구매, 재고 차감과 실패 시 복구
//! - **소프트 삭제**: 모든 삭제는 `deleted_at` 표시이며 조회에서 제외
//! - **싱글톤 DI**: `#[repository]`/`#[service]` 매크로 기반 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/* 스코프
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← Bearer 토큰 + 세션 + 역할
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← DTO 검증, ApiResponse 봉투
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 소프트 삭제 필터, 캐시
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use shop_backend::services::catalog::ProductService;
//!
//! let products = ProductService::instance().list().await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
