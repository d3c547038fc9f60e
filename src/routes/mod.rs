//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 기능별 스코프로 묶입니다.
//! 인증 수준은 각 핸들러의 `wrap = "AuthMiddleware::..."`에 선언되어 있습니다.
//!
//! | 스코프 | 공개 | 로그인 | 고객 | 관리자 |
//! |--------|------|--------|------|--------|
//! | `/auth` | 가입, 로그인, OTP, 비밀번호 재설정 | who-am-i, logout | | |
//! | `/admins` | | | | 생성 |
//! | `/categories`, `/products`, `/product-variants` | 조회 | | | 생성/수정/삭제 |
//! | `/carts` | | | 조회/담기/수정/삭제 | count |
//! | `/payments`, `/buy-now` | | | 주문 | |
//! | `/orders` | | 조회 | | |
//! | `/addresses` | | 목록/count | 생성/조회/수정/삭제 | |
//! | `/shipment-statuses` | | 단건 조회 | | 목록/수정/삭제 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 등록합니다.
///
/// 같은 스코프 안에서 `/count`는 `/{id}`보다 먼저 등록해야 합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_catalog_routes(cfg);
    configure_commerce_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::sign_up)
            .service(handlers::auth::login)
            .service(handlers::auth::verify_otp)
            .service(handlers::auth::resend_otp)
            .service(handlers::auth::forgot_password)
            .service(handlers::auth::reset_password)
            .service(handlers::auth::who_am_i)
            .service(handlers::auth::logout)
    );

    cfg.service(
        web::scope("/api/v1/admins")
            .service(handlers::admins::create_admin)
    );
}

/// 카탈로그 라우트
///
/// ```bash
/// curl http://localhost:8080/api/v1/products
///
/// curl -X POST http://localhost:8080/api/v1/categories \
///   -H "Authorization: Bearer <admin token>" \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Shoes"}'
/// ```
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .service(handlers::categories::count_categories)
            .service(handlers::categories::list_categories)
            .service(handlers::categories::get_category)
            .service(handlers::categories::create_category)
            .service(handlers::categories::update_category)
            .service(handlers::categories::delete_category)
    );

    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::count_products)
            .service(handlers::products::list_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product)
    );

    cfg.service(
        web::scope("/api/v1/product-variants")
            .service(handlers::product_variants::count_variants)
            .service(handlers::product_variants::list_variants)
            .service(handlers::product_variants::get_variant)
            .service(handlers::product_variants::create_variant)
            .service(handlers::product_variants::update_variant)
            .service(handlers::product_variants::delete_variant)
    );
}

fn configure_commerce_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/carts")
            .service(handlers::carts::count_carts)
            .service(handlers::carts::get_cart)
            .service(handlers::carts::add_to_cart)
            .service(handlers::carts::update_cart_item)
            .service(handlers::carts::remove_cart_item)
    );

    cfg.service(web::scope("/api/v1/payments").service(handlers::checkout::checkout));
    cfg.service(web::scope("/api/v1/buy-now").service(handlers::checkout::buy_now));

    cfg.service(
        web::scope("/api/v1/orders")
            .service(handlers::orders::list_orders)
            .service(handlers::orders::get_order)
    );

    cfg.service(
        web::scope("/api/v1/addresses")
            .service(handlers::addresses::count_addresses)
            .service(handlers::addresses::list_addresses)
            .service(handlers::addresses::get_address)
            .service(handlers::addresses::create_address)
            .service(handlers::addresses::update_address)
            .service(handlers::addresses::delete_address)
    );

    cfg.service(
        web::scope("/api/v1/shipment-statuses")
            .service(handlers::shipments::list_shipments)
            .service(handlers::shipments::get_shipment)
            .service(handlers::shipments::update_shipment_status)
            .service(handlers::shipments::delete_shipment)
    );
}

/// 헬스체크
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "shop_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {"database": "MongoDB", "cache": "Redis", "dependency_injection": "Singleton Macro"}
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "shop_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_reports_service() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "shop_backend");
    }

    #[actix_web::test]
    async fn test_admin_write_rejected_without_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({"name": "Shoes"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
