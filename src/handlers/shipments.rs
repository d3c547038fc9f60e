use actix_web::{delete, get, patch, web, HttpResponse};
use crate::{
    domain::{
        dto::{commerce::UpdateShipmentStatusRequest, ApiResponse},
        models::auth::AuthenticatedUser,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::commerce::ShipmentService,
};

#[get("", wrap = "AuthMiddleware::admin()")]
pub async fn list_shipments() -> Result<HttpResponse, AppError> {
    let shipments = ShipmentService::instance().list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송 목록", shipments)))
}

/// 관리자 또는 주문한 고객만 조회할 수 있습니다.
#[get("/{id}", wrap = "AuthMiddleware::required()")]
pub async fn get_shipment(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shipment = ShipmentService::instance().get(&user, &id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송 조회", shipment)))
}

#[patch("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn update_shipment_status(
    id: web::Path<String>,
    payload: web::Json<UpdateShipmentStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let shipment = ShipmentService::instance()
        .update_status(&id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송 상태가 변경되었습니다", shipment)))
}

#[delete("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_shipment(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ShipmentService::instance().delete(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("배송이 삭제되었습니다")))
}
