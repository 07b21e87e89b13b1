//! 라우트 설정 모듈
//!
//! 로그인 화면, 로컬/OAuth 인증, 홈 화면과 헬스체크 엔드포인트를 등록합니다.
//!
//! # Routes
//!
//! | 메서드 | 경로 | 접근 |
//! |--------|------|------|
//! | `GET` | `/` | 로그인 필요 ([`LoginRequired`](crate::middlewares::LoginRequired)) |
//! | `GET` | `/login` | 공개 |
//! | `POST` | `/logout` | 공개 (CSRF) |
//! | `GET` / `POST` | `/register` | 공개 (POST 는 CSRF) |
//! | `POST` | `/auth/local` | 공개 (CSRF) |
//! | `GET` | `/auth/{provider}` | 공개 |
//! | `GET` | `/auth/{provider}/callback` | 공개 (OAuth state) |
//! | `GET` | `/health` | 공개 |
//!
//! 모든 라우트는 [`SessionMiddleware`](crate::middlewares::SessionMiddleware) 안쪽에서
//! 동작해야 합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .wrap(SessionMiddleware::from_config(&secret))
//!     .configure(configure_app);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::handlers;
use crate::services::auth::OAuthService;
use crate::services::users::IdentityService;

/// 모든 라우트를 설정합니다
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
}

/// 홈 화면과 계정 등록
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::users::home)
        .service(handlers::users::register_form)
        .service(handlers::users::register);
}

/// 로그인/로그아웃과 OAuth 흐름
///
/// `POST /auth/local` 은 `GET /auth/{provider}` 보다 먼저 등록합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::login_form)
        .service(handlers::auth::logout)
        .service(handlers::auth::local_login)
        .service(handlers::auth::oauth_callback)
        .service(handlers::auth::oauth_start);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// # Examples
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "oauth_login_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": {
///     "user_store": "mongodb",
///     "oauth_providers": ["github", "kakao"]
///   }
/// }
/// ```
#[get("/health")]
async fn health_check(
    identity: web::Data<IdentityService>,
    oauth: web::Data<OAuthService>,
) -> HttpResponse {
    let providers: Vec<&str> = oauth
        .configured_providers()
        .into_iter()
        .map(|provider| provider.as_str())
        .collect();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "oauth_login_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "user_store": identity.store_name(),
            "oauth_providers": providers
        }
    }))
}
