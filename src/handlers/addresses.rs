use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::{
        dto::{
            commerce::{CreateAddressRequest, UpdateAddressRequest},
            ApiResponse, CountResponse,
        },
        models::auth::AuthenticatedUser,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::commerce::AddressService,
};

#[post("", wrap = "AuthMiddleware::customer()")]
pub async fn create_address(
    user: AuthenticatedUser,
    payload: web::Json<CreateAddressRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let address = AddressService::instance().create(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("배송지가 등록되었습니다", address)))
}

#[get("/count", wrap = "AuthMiddleware::required()")]
pub async fn count_addresses(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let count = AddressService::instance().count(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송지 수", CountResponse { count })))
}

#[get("", wrap = "AuthMiddleware::required()")]
pub async fn list_addresses(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let addresses = AddressService::instance().list(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송지 목록", addresses)))
}

#[get("/{id}", wrap = "AuthMiddleware::customer()")]
pub async fn get_address(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let address = AddressService::instance().get(&user, &id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송지 조회", address)))
}

#[patch("/{id}", wrap = "AuthMiddleware::customer()")]
pub async fn update_address(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateAddressRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let address = AddressService::instance()
        .update(&user, &id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("배송지가 수정되었습니다", address)))
}

#[delete("/{id}", wrap = "AuthMiddleware::customer()")]
pub async fn delete_address(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    AddressService::instance().delete(&user, &id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("배송지가 삭제되었습니다")))
}
