//! # 인증 서비스
//!
//! 2단계 로그인(비밀번호 → 메일 OTP), 세션 기반 요청 인증, 로그아웃,
//! 비밀번호 재설정을 담당합니다.
//!
//! ## 로그인 흐름
//!
//! ```text
//! POST /auth/login        ──▶ 비밀번호 확인 ──▶ OTP 발급 + 메일 ──▶ { otp_reference }
//! POST /auth/verify-otp   ──▶ OTP 확인(일회용) ──▶ JWT 서명 + 세션 생성 ──▶ { access_token }
//! 이후 요청               ──▶ Bearer JWT ──▶ 서명 검증 ──▶ 세션 확인 ──▶ AuthenticatedUser
//! ```
//!
//! 세션에는 토큰의 SHA-256 해시만 저장하며, 검증된 인증 주체는 같은 해시를 키로
//! Redis에 잠시 캐시합니다. 로그아웃과 비밀번호 재설정은 캐시를 함께 지웁니다.

use std::future::Future;
use std::sync::Arc;
use bcrypt::verify;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    config::{JwtConfig, OtpConfig, PasswordConfig, RedisConfig, ResetTokenConfig},
    domain::{
        dto::auth::{
            request::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, VerifyOtpRequest},
            response::{AccountResponse, LoginResponse, OtpChallengeResponse},
        },
        entities::accounts::{Account, AccountKind, Credentials, OtpSecurity, ResetToken, Session},
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::accounts::{CredentialsRepository, ResetTokenRepository, SessionRepository},
    services::{
        accounts::AccountService,
        auth::{otp, token_service::hash_token, TokenService},
        notifications::MailService,
    },
    utils::{string_utils::normalize_email, time::to_chrono},
};

const PRINCIPAL_CACHE_PREFIX: &str = "auth:principal:";
const OTP_REF_ATTEMPTS: usize = 5;

/// 인증 및 세션 서비스
#[service(name = "auth")]
pub struct AuthService {
    account_service: Arc<AccountService>,

    credentials_repo: Arc<CredentialsRepository>,

    session_repo: Arc<SessionRepository>,

    reset_token_repo: Arc<ResetTokenRepository>,

    token_service: Arc<TokenService>,

    mail_service: Arc<MailService>,

    redis: Arc<RedisClient>,
}

impl AuthService {
    /// 로그인 1단계: 비밀번호 확인 후 OTP 챌린지 발급
    ///
    /// 관리자 계정을 먼저 찾고, 없으면 고객 계정을 찾습니다.
    /// 이메일이 없거나 비밀번호가 틀리면 같은 401 메시지를 반환합니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<OtpChallengeResponse> {
        let email = normalize_email(&request.email);

        let Some((kind, account)) = self.find_by_email(&email).await? else {
            log::warn!("로그인 실패: 존재하지 않는 이메일");
            return Err(invalid_login());
        };
        let account_id = account_id_of(&account)?;

        let credentials = self.credentials_repo
            .find_by_account(kind, &account_id)
            .await?
            .ok_or_else(invalid_login)?;

        let password_hash = credentials.password_hash.as_deref().ok_or_else(invalid_login)?;
        let matches = verify(&request.password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("로그인 실패: 비밀번호 불일치 ({} {})", kind, account_id);
            return Err(invalid_login());
        }

        self.issue_challenge(&credentials, &account.email).await
    }

    /// 같은 참조 코드의 자격 증명에 새 OTP를 다시 발급합니다.
    pub async fn resend_otp(&self, otp_ref: &str) -> AppResult<OtpChallengeResponse> {
        let credentials = self.credentials_repo
            .find_by_otp_ref(otp_ref.trim())
            .await?
            .ok_or_else(|| AppError::ValidationError("유효하지 않은 OTP 참조 코드입니다".to_string()))?;

        let account = self.find_owner(&credentials).await?;

        self.issue_challenge(&credentials, &account.email).await
    }

    /// 로그인 2단계: OTP 확인 후 토큰과 세션 발급
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 참조 코드 없음, 계정 없음, 만료, 코드 불일치, 이미 사용됨
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<LoginResponse> {
        let now = DateTime::now();

        let credentials = self.credentials_repo
            .find_by_otp_ref(&request.otp_reference)
            .await?
            .ok_or_else(|| AppError::ValidationError("유효하지 않은 OTP 참조 코드입니다".to_string()))?;

        let mut account = self.find_owner(&credentials).await?;
        let kind = credentials.account_kind;
        let account_id = credentials.account_id;

        let bypass = OtpConfig::bypass_code();
        credentials
            .security
            .verify(&request.otp, bypass.as_deref(), now)
            .map_err(|rejection| {
                log::warn!("OTP 거부 ({} {}): {}", kind, account_id, rejection);
                AppError::ValidationError(rejection.to_string())
            })?;

        let credentials_id = credentials
            .id
            .ok_or_else(|| AppError::InternalError("자격 증명 ID가 없습니다".to_string()))?;

        if !self.credentials_repo.consume_otp(&credentials_id, &request.otp_reference).await? {
            return Err(AppError::ValidationError("이미 사용된 OTP입니다".to_string()));
        }

        let issued = self.token_service.issue(kind, &account_id)?;

        let session = self.session_repo
            .insert(Session::open(kind, account_id, issued.token_hash, now, JwtConfig::expiration_hours()))
            .await?;

        self.account_service.store(kind).touch_last_login(&account_id, now).await?;
        account.last_login_at = Some(now);

        log::info!("🔐 세션 생성: {} {}", kind, account_id);

        Ok(LoginResponse::bearer(
            issued.access_token,
            issued.expires_in,
            session,
            AccountResponse::from_account(kind, account),
        ))
    }

    /// `Authorization` 헤더로 요청의 인증 주체를 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 헤더/서명/세션/계정 중 하나라도 유효하지 않음
    pub async fn authenticate(&self, auth_header: &str) -> AppResult<AuthenticatedUser> {
        let token = self.token_service.extract_bearer_token(auth_header)?;
        let claims = self.token_service.verify(token)?;
        let token_hash = hash_token(token);
        let cache_key = principal_cache_key(&token_hash);

        match self.redis.get::<AuthenticatedUser>(&cache_key).await {
            Ok(Some(principal)) => return Ok(principal),
            Ok(None) => {}
            Err(e) => log::warn!("인증 캐시 조회 실패: {}", e),
        }

        let now = DateTime::now();
        let session = self.session_repo
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("세션을 찾을 수 없습니다".to_string()))?;

        let session_id = session
            .id
            .ok_or_else(|| AppError::InternalError("세션 ID가 없습니다".to_string()))?;

        if session.is_stale_at(now) {
            self.session_repo.expire(&session_id, now).await?;
            log::info!("세션 만료 처리: {}", session_id);
            return Err(AppError::AuthenticationError("세션이 만료되었습니다".to_string()));
        }

        if !session.is_active_at(now) {
            return Err(AppError::AuthenticationError("세션이 만료되었습니다".to_string()));
        }

        if claims.sub != session.account_id.to_hex() || claims.kind != session.account_kind {
            log::warn!("토큰 주체와 세션 소유자가 다릅니다: {}", session_id);
            return Err(AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()));
        }

        self.account_service
            .store(session.account_kind)
            .find_active_by_id(&session.account_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("계정을 찾을 수 없습니다".to_string()))?;

        let principal = AuthenticatedUser::new(session.account_kind, session.account_id, session_id);

        let ttl = principal_cache_ttl(session.remaining_seconds(now), RedisConfig::principal_cache_ttl_seconds());
        if let Err(e) = self.redis.set_with_expiry(&cache_key, &principal, ttl).await {
            log::warn!("인증 캐시 저장 실패: {}", e);
        }

        Ok(principal)
    }

    /// 현재 세션을 만료시키고 캐시에서 지웁니다.
    pub async fn logout(&self, principal: &AuthenticatedUser) -> AppResult<()> {
        let session_id = principal.session_oid()?;

        let session = self.session_repo
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("세션을 찾을 수 없습니다".to_string()))?;

        self.session_repo.expire(&session_id, DateTime::now()).await?;
        self.evict_principals(&[session.token_hash]).await;

        log::info!("👋 로그아웃: {} {}", principal.account_kind, principal.account_id);
        Ok(())
    }

    /// 비밀번호 재설정 메일 발송
    ///
    /// 계정 존재 여부와 관계없이 성공으로 응답합니다. 이전에 발급한 토큰은 무효화됩니다.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> AppResult<()> {
        let email = normalize_email(&request.email);

        let Some((kind, account)) = self.find_by_email(&email).await? else {
            log::info!("비밀번호 재설정 요청: 등록되지 않은 이메일");
            return Ok(());
        };
        let account_id = account_id_of(&account)?;

        self.reset_token_repo.revoke_for_account(kind, &account_id).await?;

        let raw_token = otp::generate_reset_token();
        let reset_token = self.reset_token_repo
            .insert(ResetToken::new(
                hash_token(&raw_token),
                kind,
                account_id,
                DateTime::now(),
                ResetTokenConfig::expiry_minutes(),
            ))
            .await?;

        log::info!("🔑 비밀번호 재설정 토큰 발급: {} {}", kind, account_id);

        let delivery = self.mail_service
            .send_password_reset(&account.email, &raw_token, to_chrono(reset_token.expires_at))
            .await;
        ignore_delivery_failure(delivery)
    }

    /// 재설정 토큰으로 비밀번호를 바꾸고 해당 계정의 모든 세션을 만료시킵니다.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<()> {
        let now = DateTime::now();
        let invalid = || AppError::ValidationError("유효하지 않은 재설정 토큰입니다".to_string());

        let token = self.reset_token_repo
            .find_active_by_hash(&hash_token(request.token.trim()))
            .await?
            .ok_or_else(invalid)?;

        if !token.is_usable_at(now) {
            return Err(invalid());
        }

        let token_id = token
            .id
            .ok_or_else(|| AppError::InternalError("재설정 토큰 ID가 없습니다".to_string()))?;

        if !self.reset_token_repo.consume(&token_id).await? {
            return Err(invalid());
        }

        undo_on_error(
            self.change_password(&token, &request.new_password),
            async {
                self.reset_token_repo.restore(&token_id).await?;
                log::warn!("비밀번호 재설정 실패, 토큰 복구: {}", token_id);
                Ok(())
            },
        )
        .await?;

        let token_hashes = self.session_repo
            .expire_all_for_account(token.account_kind, &token.account_id, now)
            .await?;
        self.evict_principals(&token_hashes).await;

        log::info!(
            "🔑 비밀번호 재설정 완료: {} {} (세션 {}개 만료)",
            token.account_kind,
            token.account_id,
            token_hashes.len()
        );
        Ok(())
    }

    async fn change_password(&self, token: &ResetToken, new_password: &str) -> AppResult<()> {
        match self.account_service.find_active(token.account_kind, &token.account_id).await {
            Err(AppError::NotFound(_)) => {
                return Err(AppError::ValidationError("유효하지 않은 재설정 토큰입니다".to_string()));
            }
            other => { other?; }
        }

        let password_hash = bcrypt::hash(new_password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        self.credentials_repo
            .update_password(token.account_kind, &token.account_id, &password_hash)
            .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<(AccountKind, Account)>> {
        for kind in [AccountKind::Admin, AccountKind::Customer] {
            if let Some(account) = self.account_service.store(kind).find_active_by_email(email).await? {
                return Ok(Some((kind, account)));
            }
        }
        Ok(None)
    }

    async fn find_owner(&self, credentials: &Credentials) -> AppResult<Account> {
        self.account_service
            .store(credentials.account_kind)
            .find_active_by_id(&credentials.account_id)
            .await?
            .ok_or_else(|| AppError::ValidationError("계정을 찾을 수 없습니다".to_string()))
    }

    async fn issue_challenge(&self, credentials: &Credentials, email: &str) -> AppResult<OtpChallengeResponse> {
        let credentials_id = credentials
            .id
            .ok_or_else(|| AppError::InternalError("자격 증명 ID가 없습니다".to_string()))?;

        let otp_ref = self.fresh_reference().await?;
        let code = otp::generate_code();
        let security = OtpSecurity::issue(code.clone(), otp_ref.clone(), DateTime::now(), OtpConfig::expiry_minutes());
        let expires_at = security
            .expired_at
            .map(to_chrono)
            .ok_or_else(|| AppError::InternalError("OTP 만료 시각이 없습니다".to_string()))?;

        self.credentials_repo.set_security(&credentials_id, &security).await?;
        self.mail_service.send_otp(email, &code, &otp_ref, expires_at).await?;

        log::info!("📨 OTP 발급: {} {}", credentials.account_kind, credentials.account_id);

        Ok(OtpChallengeResponse {
            message: "OTP가 전송되었습니다".to_string(),
            otp_reference: otp_ref,
            expires_at,
        })
    }

    async fn fresh_reference(&self) -> AppResult<String> {
        for _ in 0..OTP_REF_ATTEMPTS {
            let candidate = otp::generate_reference();
            if !self.credentials_repo.otp_ref_in_use(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::InternalError("OTP 참조 코드를 생성하지 못했습니다".to_string()))
    }

    async fn evict_principals(&self, token_hashes: &[String]) {
        if token_hashes.is_empty() {
            return;
        }

        let keys: Vec<String> = token_hashes.iter().map(|h| principal_cache_key(h)).collect();
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("인증 캐시 삭제 실패: {}", e);
        }
    }
}

fn invalid_login() -> AppError {
    AppError::AuthenticationError("이메일 또는 비밀번호가 올바르지 않습니다".to_string())
}

fn account_id_of(account: &Account) -> AppResult<ObjectId> {
    account
        .id
        .ok_or_else(|| AppError::InternalError("계정 ID가 없습니다".to_string()))
}

/// `work`가 실패하면 `undo`로 앞선 변경을 되돌리고 원래 에러를 반환합니다.
async fn undo_on_error<T, W, U>(work: W, undo: U) -> AppResult<T>
where
    W: Future<Output = AppResult<T>>,
    U: Future<Output = AppResult<()>>,
{
    match work.await {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(undo_err) = undo.await {
                log::error!("❌ 보상 작업 실패: {}", undo_err);
            }
            Err(e)
        }
    }
}

/// 재설정 메일 발송 실패는 기록만 합니다. 응답이 달라지면 가입 여부가 드러납니다.
fn ignore_delivery_failure(delivery: AppResult<()>) -> AppResult<()> {
    if let Err(e) = delivery {
        log::error!("❌ 비밀번호 재설정 메일 발송 실패: {}", e);
    }
    Ok(())
}

fn principal_cache_key(token_hash: &str) -> String {
    format!("{}{}", PRINCIPAL_CACHE_PREFIX, token_hash)
}

/// 세션 남은 시간과 설정 상한 중 작은 값 (초)
fn principal_cache_ttl(remaining_seconds: i64, max_seconds: u64) -> usize {
    let remaining = u64::try_from(remaining_seconds).unwrap_or(0);
    remaining.min(max_seconds) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_cache_key_uses_token_hash() {
        assert_eq!(principal_cache_key("abc"), "auth:principal:abc");
    }

    #[test]
    fn test_principal_cache_ttl_is_capped_by_session_life() {
        assert_eq!(principal_cache_ttl(21_600, 300), 300);
        assert_eq!(principal_cache_ttl(42, 300), 42);
        assert_eq!(principal_cache_ttl(0, 300), 0);
        assert_eq!(principal_cache_ttl(-5, 300), 0);
    }

    #[test]
    fn test_invalid_login_is_unauthorized() {
        assert!(matches!(invalid_login(), AppError::AuthenticationError(_)));
    }

    #[actix_web::test]
    async fn test_undo_runs_only_when_work_fails() {
        use std::cell::Cell;

        let undone = Cell::new(false);
        let result = undo_on_error(async { Ok(7) }, async {
            undone.set(true);
            Ok(())
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());

        let result: AppResult<()> = undo_on_error(
            async { Err(AppError::DatabaseError("write failed".to_string())) },
            async {
                undone.set(true);
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(undone.get());
    }

    #[actix_web::test]
    async fn test_undo_failure_keeps_original_error() {
        let result: AppResult<()> = undo_on_error(
            async { Err(AppError::ValidationError("유효하지 않은 재설정 토큰입니다".to_string())) },
            async { Err(AppError::DatabaseError("restore failed".to_string())) },
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_reset_mail_failure_does_not_change_response() {
        let delivery = Err(AppError::ExternalServiceError("메일 발송에 실패했습니다".to_string()));

        assert!(ignore_delivery_failure(delivery).is_ok());
        assert!(ignore_delivery_failure(Ok(())).is_ok());
    }
}
