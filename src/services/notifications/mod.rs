//! 알림 서비스 (메일)

pub mod mail_service;

pub use mail_service::*;
