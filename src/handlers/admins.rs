use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::{auth::request::SignUpRequest, ApiResponse},
    errors::AppError,
    middlewares::AuthMiddleware,
    services::accounts::AccountService,
};

/// 관리자가 다른 관리자 계정을 만듭니다.
#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_admin(
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let admin = AccountService::instance()
        .create_admin(payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("관리자 계정이 생성되었습니다", admin)))
}
