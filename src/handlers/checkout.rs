//! 결제 핸들러
//!
//! `POST /payments`는 활성 장바구니 전체를, `POST /buy-now`는 옵션 하나를 주문합니다.
//! 둘 다 고객 전용이며 가장 최근에 등록한 배송지로 배송이 만들어집니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::{
        dto::{
            commerce::{BuyNowRequest, CheckoutRequest},
            ApiResponse,
        },
        models::auth::AuthenticatedUser,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::commerce::CheckoutService,
};

#[post("", wrap = "AuthMiddleware::customer()")]
pub async fn checkout(
    user: AuthenticatedUser,
    payload: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let placed = CheckoutService::instance()
        .checkout(&user, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("주문이 완료되었습니다", placed)))
}

#[post("", wrap = "AuthMiddleware::customer()")]
pub async fn buy_now(
    user: AuthenticatedUser,
    payload: web::Json<BuyNowRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let placed = CheckoutService::instance()
        .buy_now(&user, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("주문이 완료되었습니다", placed)))
}
