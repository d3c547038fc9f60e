use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::{
        catalog::{CreateProductVariantRequest, UpdateProductVariantRequest},
        ApiResponse, CountResponse,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::catalog::ProductVariantService,
};

#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_variant(
    payload: web::Json<CreateProductVariantRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let variant = ProductVariantService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("상품 옵션이 생성되었습니다", variant)))
}

#[get("/count")]
pub async fn count_variants() -> Result<HttpResponse, AppError> {
    let count = ProductVariantService::instance().count().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 옵션 수", CountResponse { count })))
}

#[get("")]
pub async fn list_variants() -> Result<HttpResponse, AppError> {
    let variants = ProductVariantService::instance().list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 옵션 목록", variants)))
}

#[get("/{id}")]
pub async fn get_variant(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let variant = ProductVariantService::instance().get(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 옵션 조회", variant)))
}

#[patch("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn update_variant(
    id: web::Path<String>,
    payload: web::Json<UpdateProductVariantRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let variant = ProductVariantService::instance().update(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 옵션이 수정되었습니다", variant)))
}

#[delete("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_variant(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ProductVariantService::instance().delete(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("상품 옵션이 삭제되었습니다")))
}
