use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::{
        catalog::{CreateCategoryRequest, UpdateCategoryRequest},
        ApiResponse, CountResponse,
    },
    errors::AppError,
    middlewares::AuthMiddleware,
    services::catalog::CategoryService,
};

#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_category(
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = CategoryService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("카테고리가 생성되었습니다", category)))
}

#[get("/count")]
pub async fn count_categories() -> Result<HttpResponse, AppError> {
    let count = CategoryService::instance().count().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("카테고리 수", CountResponse { count })))
}

#[get("")]
pub async fn list_categories() -> Result<HttpResponse, AppError> {
    let categories = CategoryService::instance().list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("카테고리 목록", categories)))
}

#[get("/{id}")]
pub async fn get_category(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = CategoryService::instance().get(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("카테고리 조회", category)))
}

#[patch("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn update_category(
    id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = CategoryService::instance().update(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("카테고리가 수정되었습니다", category)))
}

#[delete("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_category(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    CategoryService::instance().delete(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("카테고리가 삭제되었습니다")))
}
