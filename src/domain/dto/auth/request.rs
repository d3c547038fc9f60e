use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::{deserialize_trimmed, validate_not_blank, validate_password_spacing};

/// 고객 회원가입 / 관리자 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    #[validate(length(min = 5, max = 254, message = "이메일은 5-254자 사이여야 합니다"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_spacing"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(equal = 6, message = "OTP는 6자리입니다"))]
    pub otp: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(equal = 6, message = "OTP 참조 코드는 6자리입니다"))]
    pub otp_reference: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub token: String,

    #[validate(length(min = 8, max = 128, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_spacing"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_trims_and_validates() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"name": " Asha ", "email": "  asha@example.com ", "password": "s3cret-pass"}"#,
        )
        .unwrap();

        assert_eq!(req.name, "Asha");
        assert_eq!(req.email, "asha@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_sign_up_rejects_bad_password_and_email() {
        let short = SignUpRequest { name: "A".into(), email: "a@b.co".into(), password: "short".into() };
        assert!(short.validate().is_err());

        let padded = SignUpRequest { name: "A".into(), email: "a@b.co".into(), password: " padded-pass".into() };
        assert!(padded.validate().is_err());

        let bad_email = SignUpRequest { name: "A".into(), email: "not-an-email".into(), password: "long-enough".into() };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_verify_otp_lengths() {
        let ok = VerifyOtpRequest { otp: "123456".into(), otp_reference: "AB12CD".into() };
        assert!(ok.validate().is_ok());

        let bad = VerifyOtpRequest { otp: "1234".into(), otp_reference: "AB12CD".into() };
        assert!(bad.validate().is_err());
    }
}
