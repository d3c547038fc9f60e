use actix_web::{get, web, HttpResponse};
use crate::{
    domain::{dto::ApiResponse, models::auth::AuthenticatedUser},
    errors::AppError,
    middlewares::AuthMiddleware,
    services::commerce::OrderService,
};

/// 관리자는 전체 주문, 고객은 본인 주문
#[get("", wrap = "AuthMiddleware::required()")]
pub async fn list_orders(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = OrderService::instance().list(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("주문 목록", orders)))
}

#[get("/{id}", wrap = "AuthMiddleware::required()")]
pub async fn get_order(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = OrderService::instance().get(&user, &id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("주문 조회", order)))
}
