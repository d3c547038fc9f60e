//! # 인증 HTTP 핸들러
//!
//! | 메서드 | 경로 | 설명 | 인증 |
//! |--------|------|------|------|
//! | `POST` | `/auth/sign-up` | 고객 회원가입 | - |
//! | `POST` | `/auth/login` | 비밀번호 확인 후 OTP 발송 | - |
//! | `POST` | `/auth/verify-otp` | OTP 확인 후 토큰 발급 | - |
//! | `POST` | `/auth/resend-otp/{otp_ref}` | OTP 재발송 | - |
//! | `POST` | `/auth/forgot-password` | 재설정 링크 메일 | - |
//! | `POST` | `/auth/reset-password` | 비밀번호 재설정 | - |
//! | `GET` | `/auth/who-am-i` | 현재 계정과 세션 | 필수 |
//! | `POST` | `/auth/logout` | 현재 세션 만료 | 필수 |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::{
        dto::{
            auth::request::{
                ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignUpRequest, VerifyOtpRequest,
            },
            ApiResponse,
        },
        models::auth::AuthenticatedUser,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::{accounts::AccountService, auth::AuthService},
};

#[post("/sign-up")]
pub async fn sign_up(
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let account = AccountService::instance()
        .sign_up(payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("회원가입이 완료되었습니다", account)))
}

/// 로그인 1단계
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let challenge = AuthService::instance()
        .login(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP가 전송되었습니다", challenge)))
}

/// 로그인 2단계
#[post("/verify-otp")]
pub async fn verify_otp(
    payload: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let login_result = AuthService::instance()
        .verify_otp(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("로그인되었습니다", login_result)))
}

#[post("/resend-otp/{otp_ref}")]
pub async fn resend_otp(
    otp_ref: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let challenge = AuthService::instance()
        .resend_otp(&otp_ref)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP가 다시 전송되었습니다", challenge)))
}

/// 가입 여부와 관계없이 같은 응답
#[post("/forgot-password")]
pub async fn forgot_password(
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance()
        .forgot_password(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "가입된 이메일이라면 비밀번호 재설정 링크가 전송됩니다",
    )))
}

#[post("/reset-password")]
pub async fn reset_password(
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance()
        .reset_password(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("비밀번호가 변경되었습니다")))
}

#[get("/who-am-i", wrap = "AuthMiddleware::required()")]
pub async fn who_am_i(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = AccountService::instance().profile(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("현재 로그인한 계정입니다", profile)))
}

#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    AuthService::instance().logout(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다")))
}
