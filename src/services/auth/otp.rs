//! OTP 코드, 참조 코드, 재설정 토큰 난수 생성

use rand::{distr::Alphanumeric, Rng};

pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;
pub const OTP_REF_LENGTH: usize = 6;
pub const RESET_TOKEN_LENGTH: usize = 32;

/// 6자리 숫자 OTP
pub fn generate_code() -> String {
    rand::rng().random_range(OTP_MIN..=OTP_MAX).to_string()
}

/// 메일과 응답에 함께 실리는 영숫자 참조 코드
pub fn generate_reference() -> String {
    random_alphanumeric(OTP_REF_LENGTH)
}

pub fn generate_reset_token() -> String {
    random_alphanumeric(RESET_TOKEN_LENGTH)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_six_digits_in_range() {
        for _ in 0..200 {
            let code = generate_code();
            let value: u32 = code.parse().unwrap();

            assert_eq!(code.len(), 6);
            assert!((OTP_MIN..=OTP_MAX).contains(&value));
        }
    }

    #[test]
    fn test_reference_is_alphanumeric() {
        let reference = generate_reference();

        assert_eq!(reference.len(), OTP_REF_LENGTH);
        assert!(reference.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_reset_token_length() {
        let token = generate_reset_token();

        assert_eq!(token.len(), RESET_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
