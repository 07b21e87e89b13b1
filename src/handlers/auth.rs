//! Authentication HTTP Handlers
//!
//! 로그인 화면과 로그인/로그아웃 처리를 담당합니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 아이디/비밀번호 폼 (`POST /auth/local`)
//! - **OAuth 2.0**: github, google, kakao, facebook, instagram
//!   (`GET /auth/{provider}`, `GET /auth/{provider}/callback`)
//!
//! 로그인에 성공하면 세션에 `provider:provider_user_id` 식별자를 기록하고 `/` 로 보냅니다.
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::config::AuthProvider;
use crate::domain::{CsrfForm, LocalLoginRequest, OAuthCallbackQuery};
use crate::errors::errors::AppError;
use crate::handlers::{html, redirect};
use crate::middlewares::Session;
use crate::services::auth::{OAuthService, SessionIdentityCodec};
use crate::services::users::{IdentityService, UserService};
use crate::utils::string_utils::{constant_time_eq, first_validation_message};
use crate::views::{login_page, LoginView};

const LOGIN_PATH: &str = "/login";

/// 로그인 페이지
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_form(
    session: Session,
    oauth: web::Data<OAuthService>,
) -> Result<HttpResponse, AppError> {
    let flashes = session.take_flashes();
    let csrf_token = session.csrf_token();
    let providers = oauth.configured_providers();

    Ok(html(login_page(&LoginView {
        flashes: &flashes,
        csrf_token: &csrf_token,
        providers: &providers,
    })))
}

/// 로컬 로그인 핸들러
///
/// 실패 사유와 관계없이 같은 메시지를 보여주고 `/login` 으로 돌려보냅니다.
///
/// # Endpoint
/// `POST /auth/local`
#[post("/auth/local")]
pub async fn local_login(
    session: Session,
    user_service: web::Data<UserService>,
    form: web::Form<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    if let Err(errors) = form.validate() {
        session.flash(first_validation_message(&errors));
        return Ok(redirect(LOGIN_PATH));
    }

    match user_service.verify_local(&form.login_id, &form.password).await {
        Ok(user) => {
            log::info!("로컬 로그인 성공: {}", form.login_id);
            session.login(SessionIdentityCodec::encode(&user));
            Ok(redirect("/"))
        }
        Err(AppError::AuthenticationError(message)) => {
            log::info!("로컬 로그인 실패: {}", form.login_id);
            session.flash(message);
            Ok(redirect(LOGIN_PATH))
        }
        Err(e) => Err(e),
    }
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /logout`
#[post("/logout")]
pub async fn logout(
    session: Session,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    if let Some(identity) = session.identity() {
        log::info!("로그아웃: {}", identity);
    }
    session.logout();
    session.flash("로그아웃되었습니다");

    Ok(redirect(LOGIN_PATH))
}

/// OAuth 로그인 시작 핸들러
///
/// 세션에 새 `state` 를 보관한 뒤 프로바이더 인증 페이지로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /auth/{provider}`
#[get("/auth/{provider}")]
pub async fn oauth_start(
    session: Session,
    oauth: web::Data<OAuthService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let Some(provider) = oauth_provider(&session, &path) else {
        return Ok(redirect(LOGIN_PATH));
    };

    if !oauth.is_configured(provider) {
        log::warn!("설정되지 않은 OAuth 프로바이더 요청: {}", provider);
        session.flash(format!(
            "{} 로그인이 설정되어 있지 않습니다",
            provider.display_name()
        ));
        return Ok(redirect(LOGIN_PATH));
    }

    let state = session.set_oauth_state(provider);
    let url = oauth.authorize_url(provider, &state)?;

    log::debug!("{} 인증 페이지로 이동", provider.display_name());
    Ok(redirect(url))
}

/// OAuth 콜백 핸들러
///
/// 처리 순서:
/// 1. 세션의 `state` 를 꺼내 (재사용 불가) 프로바이더와 `state` 가 일치하는지 확인
/// 2. 인가 코드를 액세스 토큰으로 교환하고 프로필 조회
/// 3. `(provider, provider_user_id)` 로 사용자를 찾거나 생성
/// 4. 세션에 로그인
///
/// # Endpoint
/// `GET /auth/{provider}/callback`
#[get("/auth/{provider}/callback")]
pub async fn oauth_callback(
    session: Session,
    oauth: web::Data<OAuthService>,
    identity_service: web::Data<IdentityService>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let pending = session.take_oauth_state();

    let Some(provider) = oauth_provider(&session, &path) else {
        return Ok(redirect(LOGIN_PATH));
    };
    let label = provider.display_name();

    if let Some(error) = &query.error {
        log::info!(
            "{} 인증 거부: {} ({})",
            label,
            error,
            query.error_description.as_deref().unwrap_or("-")
        );
        session.flash(format!("{} 로그인이 취소되었습니다", label));
        return Ok(redirect(LOGIN_PATH));
    }

    let state_matches = match (&pending, &query.state) {
        (Some(pending), Some(state)) => {
            pending.provider == provider
                && constant_time_eq(pending.state.as_bytes(), state.as_bytes())
        }
        _ => false,
    };
    let code = query.code.as_deref().filter(|code| !code.is_empty());

    let Some(code) = code.filter(|_| state_matches) else {
        log::warn!("{} 콜백 state 불일치 또는 code 누락", label);
        session.flash("로그인 요청이 유효하지 않습니다. 다시 시도해주세요");
        return Ok(redirect(LOGIN_PATH));
    };

    let (profile, access_token) = match oauth.authenticate(provider, code).await {
        Ok(result) => result,
        Err(e) => {
            log::warn!("{} 인증 실패: {}", label, e);
            session.flash(format!("{} 로그인에 실패했습니다", label));
            return Ok(redirect(LOGIN_PATH));
        }
    };

    match identity_service.resolve_profile(profile, Some(access_token)).await {
        Ok(user) => {
            log::info!("{} 로그인 성공: {}", label, user.provider_user_id);
            session.login(SessionIdentityCodec::encode(&user));
            Ok(redirect("/"))
        }
        Err(AppError::DatabaseError(e)) => {
            log::error!("{} 사용자 해석 실패: {}", label, e);
            session.flash("로그인 처리 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요");
            Ok(redirect(LOGIN_PATH))
        }
        Err(e) => {
            log::warn!("{} 사용자 해석 거부: {}", label, e);
            session.flash(format!("{} 로그인에 실패했습니다", label));
            Ok(redirect(LOGIN_PATH))
        }
    }
}

/// 경로의 프로바이더 이름을 OAuth 프로바이더로 해석합니다.
/// 해석할 수 없으면 플래시를 남기고 `None`.
fn oauth_provider(session: &Session, raw: &str) -> Option<AuthProvider> {
    match raw.parse::<AuthProvider>() {
        Ok(provider) if provider.is_oauth() => Some(provider),
        _ => {
            log::debug!("지원하지 않는 로그인 방식: {}", raw);
            session.flash("지원하지 않는 로그인 방식입니다");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::header::ContentType;
    use actix_web::http::StatusCode;
    use actix_web::test;

    use super::*;
    use crate::config::OAuthClientConfig;
    use crate::handlers::testing::{csrf_from, location};
    use crate::repositories::users::{MemoryUserStore, UserStore};

    fn github_only() -> OAuthService {
        OAuthService::new([OAuthClientConfig {
            provider: AuthProvider::GitHub,
            client_id: "gh-client".to_string(),
            client_secret: "gh-secret".to_string(),
            callback_url: "http://localhost:3000/auth/github/callback".to_string(),
        }])
    }

    #[actix_web::test]
    async fn test_login_page_shows_configured_providers_only() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        let res = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(body.contains("/auth/github"));
        assert!(!body.contains("/auth/kakao"));
        assert!(body.contains(r#"name="_csrf""#));
    }

    #[actix_web::test]
    async fn test_local_login_without_csrf_is_forbidden() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());
        let (cookie, _) = login_form!(app);

        let req = test::TestRequest::post()
            .uri("/auth/local")
            .cookie(cookie)
            .insert_header(ContentType::form_url_encoded())
            .set_payload("login_id=alice&password=pw1234&_csrf=forged")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_local_login_success_and_failure() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let users = UserService::new(store.clone(), 4);
        users
            .register(crate::domain::RegisterRequest {
                login_id: "alice".to_string(),
                password: "pw1234".to_string(),
                user_name: None,
                csrf_token: String::new(),
            })
            .await
            .unwrap();
        let app = handler_app!(store, github_only());

        // 잘못된 비밀번호
        let (cookie, csrf) = login_form!(app);
        let req = test::TestRequest::post()
            .uri("/auth/local")
            .cookie(cookie.clone())
            .insert_header(ContentType::form_url_encoded())
            .set_payload(format!("login_id=alice&password=wrong&_csrf={}", csrf))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");

        let cookie = session_cookie!(res, cookie);
        let req = test::TestRequest::get().uri("/login").cookie(cookie.clone()).to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains(crate::services::users::user_service::INVALID_CREDENTIALS));

        // 올바른 비밀번호
        let req = test::TestRequest::post()
            .uri("/auth/local")
            .cookie(cookie.clone())
            .insert_header(ContentType::form_url_encoded())
            .set_payload(format!("login_id=alice&password=pw1234&_csrf={}", csrf))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");

        let cookie = session_cookie!(res, cookie);
        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(body.contains("alice"));
    }

    #[actix_web::test]
    async fn test_logout_clears_identity() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let users = UserService::new(store.clone(), 4);
        users
            .register(crate::domain::RegisterRequest {
                login_id: "bob".to_string(),
                password: "pw1234".to_string(),
                user_name: None,
                csrf_token: String::new(),
            })
            .await
            .unwrap();
        let app = handler_app!(store, github_only());

        let (cookie, csrf) = login_form!(app);
        let req = test::TestRequest::post()
            .uri("/auth/local")
            .cookie(cookie.clone())
            .insert_header(ContentType::form_url_encoded())
            .set_payload(format!("login_id=bob&password=pw1234&_csrf={}", csrf))
            .to_request();
        let res = test::call_service(&app, req).await;
        let cookie = session_cookie!(res, cookie);

        // 로그인하면 CSRF 토큰이 바뀌므로 홈 화면에서 다시 읽음
        let req = test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request();
        let body = test::call_and_read_body(&app, req).await;
        let csrf = csrf_from(&body);

        let req = test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .insert_header(ContentType::form_url_encoded())
            .set_payload(format!("_csrf={}", csrf))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");

        let cookie = session_cookie!(res, cookie);
        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
    }

    #[actix_web::test]
    async fn test_oauth_start_redirects_with_state() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        let req = test::TestRequest::get().uri("/auth/github").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        let target = location(&res);
        assert!(target.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(target.contains("client_id=gh-client"));
        assert!(target.contains("state="));
        assert!(res.response().cookies().next().is_some());
    }

    #[actix_web::test]
    async fn test_oauth_start_for_unconfigured_or_unknown_provider() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        for path in ["/auth/kakao", "/auth/twitter", "/auth/local"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::FOUND, "{}", path);
            assert_eq!(location(&res), "/login", "{}", path);
        }
    }

    #[actix_web::test]
    async fn test_oauth_callback_rejects_state_mismatch() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/github").to_request()).await;
        let cookie = res.response().cookies().next().unwrap().into_owned();

        let req = test::TestRequest::get()
            .uri("/auth/github/callback?code=abc&state=forged")
            .cookie(cookie.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");

        let cookie = session_cookie!(res, cookie);
        let req = test::TestRequest::get().uri("/login").cookie(cookie).to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(body.contains("로그인 요청이 유효하지 않습니다"));
    }

    #[actix_web::test]
    async fn test_oauth_callback_without_pending_state() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        let req = test::TestRequest::get()
            .uri("/auth/github/callback?code=abc&state=anything")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
    }

    #[actix_web::test]
    async fn test_oauth_callback_with_provider_error() {
        let app = handler_app!(Arc::new(MemoryUserStore::new()), github_only());

        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/github").to_request()).await;
        let cookie = res.response().cookies().next().unwrap().into_owned();

        let req = test::TestRequest::get()
            .uri("/auth/github/callback?error=access_denied")
            .cookie(cookie.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(location(&res), "/login");

        let cookie = session_cookie!(res, cookie);
        let req = test::TestRequest::get().uri("/login").cookie(cookie).to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(body.contains("GitHub 로그인이 취소되었습니다"));
    }
}
