use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::{
        catalog::{CreateProductRequest, UpdateProductRequest},
        ApiResponse, CountResponse,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::catalog::ProductService,
};

#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_product(
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = ProductService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("상품이 생성되었습니다", product)))
}

#[get("/count")]
pub async fn count_products() -> Result<HttpResponse, AppError> {
    let count = ProductService::instance().count().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 수", CountResponse { count })))
}

#[get("")]
pub async fn list_products() -> Result<HttpResponse, AppError> {
    let products = ProductService::instance().list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 목록", products)))
}

#[get("/{id}")]
pub async fn get_product(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance().get(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품 조회", product)))
}

#[patch("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn update_product(
    id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = ProductService::instance().update(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("상품이 수정되었습니다", product)))
}

#[delete("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_product(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ProductService::instance().delete(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("상품이 삭제되었습니다")))
}
