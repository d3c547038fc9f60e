use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::entities::accounts::AccountKind;
use crate::errors::{AppError, AppResult};

/// 인증 미들웨어가 세션 검증 후 요청 확장에 넣는 인증 주체
///
/// Redis 인증 주체 캐시에도 이 형태 그대로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub account_id: String,

    pub account_kind: AccountKind,

    pub session_id: String,

    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new(account_kind: AccountKind, account_id: ObjectId, session_id: ObjectId) -> Self {
        Self {
            account_id: account_id.to_hex(),
            account_kind,
            session_id: session_id.to_hex(),
            roles: vec![account_kind.role().to_string()],
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.account_kind == AccountKind::Admin
    }

    pub fn account_oid(&self) -> AppResult<ObjectId> {
        ObjectId::parse_str(&self.account_id)
            .map_err(|_| AppError::AuthenticationError("인증 정보가 올바르지 않습니다".to_string()))
    }

    pub fn session_oid(&self) -> AppResult<ObjectId> {
        ObjectId::parse_str(&self.session_id)
            .map_err(|_| AppError::AuthenticationError("인증 정보가 올바르지 않습니다".to_string()))
    }

    /// 고객 전용 작업의 호출자 ID. 관리자는 403입니다.
    pub fn customer_id(&self) -> AppResult<ObjectId> {
        if self.account_kind != AccountKind::Customer {
            return Err(AppError::AuthorizationError("고객 계정만 사용할 수 있습니다".to_string()));
        }
        self.account_oid()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string()
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_roles_follow_account_kind() {
        let admin = AuthenticatedUser::new(AccountKind::Admin, ObjectId::new(), ObjectId::new());
        assert!(admin.is_admin());
        assert!(admin.has_role("admin"));
        assert!(!admin.has_any_role(&["customer"]));
        assert!(matches!(admin.customer_id(), Err(AppError::AuthorizationError(_))));

        let customer = AuthenticatedUser::new(AccountKind::Customer, ObjectId::new(), ObjectId::new());
        assert!(!customer.is_admin());
        assert!(customer.customer_id().is_ok());
    }

    #[actix_web::test]
    async fn test_extractor_reads_request_extensions() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&req).await.is_err());
        assert!(OptionalUser::extract(&req).await.unwrap().0.is_none());

        let user = AuthenticatedUser::new(AccountKind::Customer, ObjectId::new(), ObjectId::new());
        req.extensions_mut().insert(user.clone());

        assert_eq!(AuthenticatedUser::extract(&req).await.unwrap(), user);
    }
}
