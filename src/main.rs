//! OAuth 로그인 서비스 메인 애플리케이션
//!
//! 사용자 저장소, 세션 서명 키, OAuth 프로바이더 설정을 준비하고
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use oauth_login_service::config::{
    PasswordConfig, RateLimitConfig, ServerConfig, SessionConfig, StoreBackend, StoreConfig,
};
use oauth_login_service::db::Database;
use oauth_login_service::middlewares::SessionMiddleware;
use oauth_login_service::repositories::users::{MemoryUserStore, UserRepository, UserStore};
use oauth_login_service::routes::configure_app;
use oauth_login_service::services::auth::OAuthService;
use oauth_login_service::services::users::{IdentityService, UserService};
use oauth_login_service::utils::display_terminal::{
    print_boxed_title, print_step_complete, print_step_start, print_startup_summary,
    print_sub_task,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    print_boxed_title("OAuth Login Service");

    print_step_start(1, "사용자 저장소 준비");
    let store = initialize_user_store().await?;
    print_sub_task("user store", store.name());

    print_step_start(2, "세션 서명 키 로드");
    let session_secret = SessionConfig::secret().map_err(|e| {
        error!("세션 설정 오류: {}", e);
        io::Error::other(e)
    })?;
    print_sub_task("session cookie", &SessionConfig::cookie_name());

    print_step_start(3, "OAuth 프로바이더 설정");
    let oauth = OAuthService::from_env();
    let providers = oauth.configured_providers();
    for provider in &providers {
        print_sub_task(provider.as_str(), "enabled");
    }
    print_step_complete(3, "OAuth 프로바이더", providers.len());

    let address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let provider_names: Vec<&str> = providers.iter().map(|p| p.as_str()).collect();
    print_startup_summary(&address, store.name(), &provider_names);

    start_http_server(&address, store, oauth, session_secret).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, 경로 정규화, 액세스 로그, 세션 쿠키 미들웨어를 적용합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    address: &str,
    store: Arc<dyn UserStore>,
    oauth: OAuthService,
    session_secret: String,
) -> io::Result<()> {
    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let identity_service = web::Data::new(IdentityService::new(store.clone()));
    let user_service = web::Data::new(UserService::new(store, PasswordConfig::bcrypt_cost()));
    let oauth_service = web::Data::new(oauth);

    info!("🌐 서버가 http://{} 에서 실행중입니다", address);
    info!("📍 Health check: http://{}/health", address);

    HttpServer::new(move || {
        App::new()
            .app_data(identity_service.clone())
            .app_data(user_service.clone())
            .app_data(oauth_service.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(SessionMiddleware::from_config(&session_secret))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_app)
    })
    .bind(address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 사용자 저장소를 초기화합니다
///
/// `USER_STORE=memory` 이면 메모리 저장소를, 그 외에는 MongoDB 에 연결하고
/// `(provider, provider_user_id)` 고유 인덱스를 보장합니다.
async fn initialize_user_store() -> io::Result<Arc<dyn UserStore>> {
    match StoreConfig::backend() {
        StoreBackend::Memory => {
            info!("메모리 사용자 저장소 사용 (재시작 시 초기화)");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        StoreBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect().await.map_err(|e| {
                error!("MongoDB 연결 실패: {}", e);
                io::Error::other(e.to_string())
            })?;

            let repository = UserRepository::new(&database);
            repository.ensure_indexes().await.map_err(|e| {
                error!("사용자 인덱스 생성 실패: {}", e);
                io::Error::other(e.to_string())
            })?;

            Ok(Arc::new(repository))
        }
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr 로 출력
    match profile.as_str() {
        "prod" => report_env_file(".env.prod", dotenv::from_filename(".env.prod")),
        "dev" => report_env_file(".env.dev", dotenv::from_filename(".env.dev")),
        _ => {
            dotenv().ok();
            eprintln!("기본 .env 파일 로드 (PROFILE={})", profile);
        }
    }
}

fn report_env_file(name: &str, result: Result<std::path::PathBuf, dotenv::Error>) {
    match result {
        Ok(_) => eprintln!("{} 파일 로드 됨", name),
        Err(e) => eprintln!("{} 파일 로드 실패: {}", name, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}
