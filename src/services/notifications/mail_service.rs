//! 메일 작성 및 전달
//!
//! 메일 본문은 이 서비스가 만들고, 실제 전달은 `MailTransport` 구현이 맡습니다.
//! 현재 전달 구현은 애플리케이션 로그에 기록하는 `LogTransport` 하나뿐입니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use singleton_macro::service;
use crate::{
    config::{MailConfig, ResetTokenConfig},
    errors::{AppError, AppResult},
};

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: &MailMessage) -> AppResult<()>;
}

/// 메일을 로그로만 남기는 전달 구현
///
/// 본문에는 OTP나 재설정 링크가 들어 있으므로 debug 레벨에서만 출력합니다.
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn deliver(&self, message: &MailMessage) -> AppResult<()> {
        if message.to.trim().is_empty() {
            return Err(AppError::ExternalServiceError("수신자가 비어 있습니다".to_string()));
        }

        log::info!("📧 메일 전송: to={}, subject={}", message.to, message.subject);
        log::debug!("📧 메일 본문:\n{}", message.body);
        Ok(())
    }
}

#[service(name = "mail")]
pub struct MailService {
    // 외부 의존성 없음
}

impl MailService {
    /// 로그인 OTP 메일
    pub async fn send_otp(&self, to: &str, otp: &str, otp_ref: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        let message = otp_message(&MailConfig::from_address(), to, otp, otp_ref, expires_at);
        self.deliver(&message).await
    }

    /// 비밀번호 재설정 링크 메일
    pub async fn send_password_reset(&self, to: &str, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        let link = reset_link(&ResetTokenConfig::reset_url_base(), token);
        let message = reset_message(&MailConfig::from_address(), to, &link, expires_at);
        self.deliver(&message).await
    }

    async fn deliver(&self, message: &MailMessage) -> AppResult<()> {
        LogTransport.deliver(message).await.map_err(|e| {
            log::error!("❌ 메일 전송 실패 ({}): {}", message.to, e);
            AppError::ExternalServiceError("메일을 보내지 못했습니다".to_string())
        })
    }
}

fn otp_message(from: &str, to: &str, otp: &str, otp_ref: &str, expires_at: DateTime<Utc>) -> MailMessage {
    MailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Your OTP for Verification".to_string(),
        body: format!(
            "Your OTP for verification is: {}\nYour OTP reference is: {}\nThe code expires at {}.",
            otp,
            otp_ref,
            expires_at.to_rfc3339(),
        ),
    }
}

fn reset_message(from: &str, to: &str, link: &str, expires_at: DateTime<Utc>) -> MailMessage {
    MailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        body: format!(
            "Use the link below to choose a new password:\n{}\nThe link expires at {}.",
            link,
            expires_at.to_rfc3339(),
        ),
    }
}

fn reset_link(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base, separator, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 2, 0).unwrap()
    }

    #[test]
    fn test_otp_message_carries_code_and_reference() {
        let message = otp_message("no-reply@shop.local", "a@b.com", "482913", "aB12cD", expiry());

        assert_eq!(message.to, "a@b.com");
        assert!(message.body.contains("482913"));
        assert!(message.body.contains("aB12cD"));
    }

    #[test]
    fn test_reset_link_appends_token() {
        assert_eq!(reset_link("http://x/reset", "tok"), "http://x/reset?token=tok");
        assert_eq!(reset_link("http://x/reset?lang=en", "tok"), "http://x/reset?lang=en&token=tok");
    }

    #[test]
    fn test_reset_message_contains_link() {
        let message = reset_message("f@x", "a@b.com", "http://x/reset?token=tok", expiry());

        assert!(message.body.contains("http://x/reset?token=tok"));
    }

    #[actix_web::test]
    async fn test_log_transport_rejects_empty_recipient() {
        let mut message = otp_message("f@x", "a@b.com", "1", "r", expiry());
        assert!(LogTransport.deliver(&message).await.is_ok());

        message.to = " ".to_string();
        assert!(matches!(
            LogTransport.deliver(&message).await,
            Err(AppError::ExternalServiceError(_))
        ));
    }
}
