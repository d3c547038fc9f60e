//! 장바구니 핸들러
//!
//! 고객 본인의 활성 장바구니만 다룹니다. 전체 장바구니 수는 관리자 전용입니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::{
        dto::{
            commerce::{AddCartItemRequest, UpdateCartItemRequest},
            ApiResponse, CountResponse,
        },
        models::auth::AuthenticatedUser,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::commerce::CartService,
};

#[get("/count", wrap = "AuthMiddleware::admin()")]
pub async fn count_carts() -> Result<HttpResponse, AppError> {
    let count = CartService::instance().count().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("장바구니 수", CountResponse { count })))
}

#[get("", wrap = "AuthMiddleware::customer()")]
pub async fn get_cart(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let cart = CartService::instance().get(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("장바구니 조회", cart)))
}

/// 같은 옵션이 이미 있으면 수량을 더합니다.
#[post("", wrap = "AuthMiddleware::customer()")]
pub async fn add_to_cart(
    user: AuthenticatedUser,
    payload: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let cart = CartService::instance().add(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("장바구니에 담았습니다", cart)))
}

#[patch("/{variant_id}", wrap = "AuthMiddleware::customer()")]
pub async fn update_cart_item(
    user: AuthenticatedUser,
    variant_id: web::Path<String>,
    payload: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let cart = CartService::instance()
        .update(&user, &variant_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("장바구니 수량이 변경되었습니다", cart)))
}

#[delete("/{variant_id}", wrap = "AuthMiddleware::customer()")]
pub async fn remove_cart_item(
    user: AuthenticatedUser,
    variant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = CartService::instance().remove(&user, &variant_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("장바구니에서 뺐습니다", cart)))
}
