use serde::Serialize;

/// 성공 응답 봉투: `{"success": true, "message": "...", "data": ...}`
///
/// 실패 응답은 `AppError`가 `{"error", "message"}` 형태로 만듭니다.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success("ok", CountResponse { count: 3 })).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "message": "ok", "data": {"count": 3}}));

        let body = serde_json::to_value(ApiResponse::message("로그아웃되었습니다")).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "message": "로그아웃되었습니다"}));
    }
}
