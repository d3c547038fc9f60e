//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 JSON 캐시를 제공합니다.
//!
//! # 사용처
//!
//! - 카탈로그 리포지토리의 단건 조회 캐시 (10분)
//! - 인증 주체 캐시 (토큰 SHA-256 키, 세션 잔여 시간과 5분 중 짧은 TTL)
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://127.0.0.1:6379  # 기본값
//! ```

pub mod redis;
