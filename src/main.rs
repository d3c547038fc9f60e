//! 쇼핑몰 백엔드 메인 애플리케이션
//!
//! 환경 설정을 읽고 MongoDB/Redis 연결, 싱글톤 초기화, 인덱스 생성,
//! 초기 관리자 시드를 마친 뒤 Actix-web 서버를 띄웁니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use shop_backend::caching::redis::RedisClient;
use shop_backend::config::{CorsConfig, Environment, RateLimitConfig, ServerConfig};
use shop_backend::core::registry::ServiceLocator;
use shop_backend::db::Database;
use shop_backend::errors::AppResult;
use shop_backend::repositories::{
    accounts::{AdminRepository, CredentialsRepository, CustomerRepository, ResetTokenRepository, SessionRepository},
    catalog::{CategoryRepository, ProductRepository, ProductVariantRepository},
    commerce::{AddressRepository, CartRepository, OrderRepository, ShipmentRepository},
};
use shop_backend::routes::configure_all_routes;
use shop_backend::services::accounts::AccountService;
use shop_backend::utils::display_terminal::{print_index_report, print_startup_banner};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 쇼핑몰 백엔드 시작중...");

    let (database, redis_client) = initialize_data_stores().await;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .expect("서비스 초기화 실패");

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    ensure_indexes().await;

    if let Err(e) = AccountService::instance().seed_admin().await {
        error!("❌ 초기 관리자 생성 실패: {}", e);
    }

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 Rate Limiting → CORS → 요청 로그 → 경로 정규화 순서입니다.
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();
    let environment = format!("{:?}", Environment::current());

    print_startup_banner(env!("CARGO_PKG_VERSION"), &bind_address, &environment);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    let rate_limit = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "RATE_LIMIT_PER_SECOND와 RATE_LIMIT_BURST_SIZE는 0보다 커야 합니다",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();
    info!("🌍 CORS 허용 출처: {:?}", allowed_origins);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// PROFILE 환경변수에 따라 `.env.prod`, `.env.dev`, `.env` 중 하나를 로드합니다
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// # Panics
///
/// 둘 중 하나라도 연결에 실패하면 서버를 띄우지 않습니다.
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(
        Database::new()
            .await
            .expect("데이터베이스 연결 실패")
    );

    let redis_client = Arc::new(
        RedisClient::new()
            .await
            .expect("Redis 연결 실패")
    );

    info!("✅ Redis 연결 성공");

    (database, redis_client)
}

/// 컬렉션 인덱스를 만들고 결과를 터미널에 출력합니다
///
/// 실패한 컬렉션은 경고만 남기고 계속 진행합니다.
async fn ensure_indexes() {
    let results = vec![
        ("admins", AdminRepository::instance().create_indexes().await),
        ("customers", CustomerRepository::instance().create_indexes().await),
        ("credentials", CredentialsRepository::instance().create_indexes().await),
        ("sessions", SessionRepository::instance().create_indexes().await),
        ("reset_tokens", ResetTokenRepository::instance().create_indexes().await),
        ("categories", CategoryRepository::instance().create_indexes().await),
        ("products", ProductRepository::instance().create_indexes().await),
        ("product_variants", ProductVariantRepository::instance().create_indexes().await),
        ("carts", CartRepository::instance().create_indexes().await),
        ("orders", OrderRepository::instance().create_indexes().await),
        ("addresses", AddressRepository::instance().create_indexes().await),
        ("shipment_statuses", ShipmentRepository::instance().create_indexes().await),
    ];

    print_index_report(&summarize(&results));
}

fn summarize<'a>(results: &[(&'a str, AppResult<()>)]) -> Vec<(&'a str, bool)> {
    results
        .iter()
        .map(|(collection, result)| {
            if let Err(e) = result {
                warn!("⚠️ {} 인덱스 생성 실패: {}", collection, e);
            }
            (*collection, result.is_ok())
        })
        .collect()
}

fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
