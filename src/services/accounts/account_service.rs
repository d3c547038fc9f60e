//! # 계정 관리 서비스
//!
//! 고객 회원가입, 관리자 생성, 초기 관리자 시드, "who am I" 프로필 조회를 담당합니다.
//!
//! 관리자와 고객은 별도 컬렉션에 저장되지만 같은 [`Account`] 스키마를 공유합니다.
//! 어느 컬렉션을 쓸지는 [`AccountKind`]로 정하며, 자격 증명(비밀번호 해시와 OTP 상태)은
//! 공용 `credentials` 컬렉션에 `(account_kind, account_id)`로 묶여 저장됩니다.
//!
//! ## 비밀번호 규칙
//!
//! - 8자 이상, 앞뒤 공백 금지 (요청 DTO에서 검증)
//! - bcrypt 해시, cost는 [`PasswordConfig::bcrypt_cost`]가 환경별로 결정

use std::sync::Arc;
use bcrypt::hash;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::{PasswordConfig, SeedAdminConfig},
    domain::{
        dto::auth::{
            request::SignUpRequest,
            response::{AccountResponse, ProfileResponse, SessionResponse},
        },
        entities::accounts::{Account, AccountKind, Credentials},
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::accounts::{
        AccountStore, AdminRepository, CredentialsRepository, CustomerRepository, SessionRepository,
    },
    utils::string_utils::normalize_email,
};

/// 계정 생명주기 서비스
#[service(name = "account")]
pub struct AccountService {
    admin_repo: Arc<AdminRepository>,

    customer_repo: Arc<CustomerRepository>,

    credentials_repo: Arc<CredentialsRepository>,

    session_repo: Arc<SessionRepository>,
}

impl AccountService {
    /// 계정 종류에 맞는 저장소
    pub fn store(&self, kind: AccountKind) -> &dyn AccountStore {
        match kind {
            AccountKind::Admin => self.admin_repo.as_ref(),
            AccountKind::Customer => self.customer_repo.as_ref(),
        }
    }

    /// 고객 회원가입
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 가입된 이메일
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<AccountResponse> {
        self.register(AccountKind::Customer, request).await
    }

    /// 관리자 계정 생성 (관리자 전용 엔드포인트)
    pub async fn create_admin(&self, request: SignUpRequest) -> AppResult<AccountResponse> {
        self.register(AccountKind::Admin, request).await
    }

    /// `SEED_ADMIN_*`이 설정되어 있고 같은 이메일의 관리자가 없으면 생성합니다.
    ///
    /// 생성했으면 `true`를 반환합니다.
    pub async fn seed_admin(&self) -> AppResult<bool> {
        let Some(seed) = SeedAdminConfig::load() else {
            log::debug!("SEED_ADMIN_EMAIL/SEED_ADMIN_PASSWORD 미설정, 관리자 시드 건너뜀");
            return Ok(false);
        };

        let email = normalize_email(&seed.email);
        if self.admin_repo.find_active_by_email(&email).await?.is_some() {
            log::info!("초기 관리자가 이미 존재합니다: {}", email);
            return Ok(false);
        }

        let request = SignUpRequest {
            name: seed.name,
            email,
            password: seed.password,
        };

        match self.register(AccountKind::Admin, request).await {
            Ok(admin) => {
                log::info!("👑 초기 관리자 생성: {}", admin.email);
                Ok(true)
            }
            // 삭제된 관리자가 같은 이메일을 쓰고 있는 경우
            Err(AppError::ConflictError(msg)) => {
                log::warn!("초기 관리자를 만들 수 없습니다: {}", msg);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// 현재 인증 주체의 계정과 세션
    pub async fn profile(&self, principal: &AuthenticatedUser) -> AppResult<ProfileResponse> {
        let account = self.find_active(principal.account_kind, &principal.account_oid()?).await?;

        let session = self.session_repo
            .find_by_id(&principal.session_oid()?)
            .await?
            .ok_or_else(|| AppError::NotFound("세션을 찾을 수 없습니다".to_string()))?;

        Ok(ProfileResponse {
            account: AccountResponse::from_account(principal.account_kind, account),
            session: SessionResponse::from(session),
        })
    }

    /// 삭제되지 않은 계정 조회, 없으면 404
    pub async fn find_active(&self, kind: AccountKind, id: &ObjectId) -> AppResult<Account> {
        self.store(kind)
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("계정을 찾을 수 없습니다".to_string()))
    }

    async fn register(&self, kind: AccountKind, request: SignUpRequest) -> AppResult<AccountResponse> {
        let start_time = std::time::Instant::now();
        let email = normalize_email(&request.email);

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let account = self.store(kind)
            .insert(Account::new(request.name.trim().to_string(), email))
            .await?;

        let account_id = account
            .id
            .ok_or_else(|| AppError::InternalError("생성된 계정의 ID가 없습니다".to_string()))?;

        self.credentials_repo
            .insert(Credentials::new(kind, account_id, password_hash))
            .await?;

        log::info!("✅ {} 계정 생성: {} ({:?})", kind, account.email, start_time.elapsed());

        Ok(AccountResponse::from_account(kind, account))
    }
}
