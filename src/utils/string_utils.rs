//! # 문자열 유틸리티
//!
//! 요청 DTO 정규화와 `validator` 커스텀 검증 함수들입니다.

use serde::Deserialize;
use validator::ValidationError;
use crate::errors::errors::AppError;

pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 정규화: 앞뒤 공백 제거 후 소문자
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 요청 본문의 문자열을 앞뒤 공백 없이 받습니다.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("빈 값은 허용되지 않습니다".into()));
    }
    Ok(())
}

/// 비밀번호는 앞뒤 공백을 가질 수 없습니다.
pub fn validate_password_spacing(password: &str) -> Result<(), ValidationError> {
    if password.trim() != password {
        return Err(ValidationError::new("password_whitespace")
            .with_message("비밀번호는 공백으로 시작하거나 끝날 수 없습니다".into()));
    }
    Ok(())
}

pub fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("digits_only")
            .with_message("숫자만 입력할 수 있습니다".into()));
    }
    Ok(())
}

pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if mongodb::bson::oid::ObjectId::parse_str(value).is_err() {
        return Err(ValidationError::new("object_id")
            .with_message("유효하지 않은 ID 형식입니다".into()));
    }
    Ok(())
}

/// ISO 4217 형식의 대문자 3글자 통화 코드
pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("currency")
            .with_message("통화는 대문자 3글자여야 합니다 (예: INR)".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn test_deserialize_helpers() {
        #[derive(Deserialize)]
        struct LabelForm {
            #[serde(deserialize_with = "deserialize_trimmed")]
            name: String,
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            note: Option<String>,
        }

        let form: LabelForm = serde_json::from_str(r#"{"name": "  T-Shirt ", "note": "  "}"#).unwrap();
        assert_eq!(form.name, "T-Shirt");
        assert_eq!(form.note, None);

        let form: LabelForm = serde_json::from_str(r#"{"name": "Cap"}"#).unwrap();
        assert_eq!(form.note, None);
    }

    #[test]
    fn test_password_spacing() {
        assert!(validate_password_spacing("correct horse").is_ok());
        assert!(validate_password_spacing(" leading").is_err());
        assert!(validate_password_spacing("trailing ").is_err());
    }

    #[test]
    fn test_digits_and_currency() {
        assert!(validate_digits("9876543210").is_ok());
        assert!(validate_digits("98765-4321").is_err());
        assert!(validate_digits("").is_err());

        assert!(validate_currency("INR").is_ok());
        assert!(validate_currency("inr").is_err());
        assert!(validate_currency("RUPEE").is_err());
    }

    #[test]
    fn test_object_id() {
        assert!(validate_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(validate_object_id("not-an-id").is_err());
    }
}
