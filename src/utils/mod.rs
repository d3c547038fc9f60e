//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 정규화와 `validator` 커스텀 검증 함수
//! - [`time`] - BSON/chrono 시각 변환과 만료 시각 계산
//! - [`display_terminal`] - 시작 배너와 초기화 진행 출력

pub mod string_utils;
pub mod time;
pub mod display_terminal;
