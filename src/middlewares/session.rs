//! 서명된 쿠키 세션 미들웨어
//!
//! 세션 상태 전체를 쿠키 하나에 담고 HMAC-SHA256 으로 서명합니다.
//! 서버 측 세션 저장소는 없습니다.
//!
//! ## 쿠키 형식
//!
//! ```text
//! oasess = base64url(json(SessionData)) "." base64url(hmac_sha256(앞부분))
//! ```
//!
//! 서명이 맞지 않거나 해석할 수 없는 쿠키는 빈 세션으로 취급합니다.
//! 요청 처리 중 세션이 바뀐 경우에만 `Set-Cookie` 를 내보냅니다.
//!
//! ## 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(SessionMiddleware::new(secret, "oasess", false))
//!     .service(login_page);
//!
//! #[get("/login")]
//! async fn login_page(session: Session) -> HttpResponse {
//!     let flashes = session.take_flashes();
//!     let csrf = session.csrf_token();
//!     // ...
//! }
//! ```

use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use futures_util::future::LocalBoxFuture;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::{AuthProvider, SessionConfig};
use crate::errors::errors::{AppError, ErrorContext};
use crate::utils::string_utils::constant_time_eq;

type HmacSha256 = Hmac<Sha256>;

/// 진행 중인 OAuth 인증 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOAuth {
    pub provider: AuthProvider,
    pub state: String,
}

/// 쿠키에 직렬화되는 세션 내용
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// 세션 식별자 `provider:provider_user_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_state: Option<PendingOAuth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<String>,
}

/// 세션 쿠키 서명 키
#[derive(Clone)]
pub struct SessionKey {
    secret: Rc<[u8]>,
}

impl SessionKey {
    pub fn new(secret: &[u8]) -> Self {
        Self { secret: Rc::from(secret) }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.secret).context("세션 서명 키 오류")
    }

    /// 세션 내용을 서명된 쿠키 값으로 만듭니다.
    pub fn seal(&self, data: &SessionData) -> Result<String, AppError> {
        let json = serde_json::to_vec(data).context("세션 직렬화 실패")?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    /// 쿠키 값을 검증하고 세션 내용을 복원합니다.
    ///
    /// 서명 불일치, 형식 오류 모두 `None` 입니다.
    pub fn open(&self, value: &str) -> Option<SessionData> {
        let (payload, signature_b64) = value.split_once('.')?;

        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

struct SessionState {
    data: SessionData,
    changed: bool,
}

/// 요청 단위 세션 핸들
///
/// `SessionMiddleware` 가 요청마다 하나씩 만들어 extensions 에 넣습니다.
#[derive(Clone)]
pub struct Session(Rc<RefCell<SessionState>>);

impl Session {
    fn from_data(data: SessionData) -> Self {
        Session(Rc::new(RefCell::new(SessionState { data, changed: false })))
    }

    fn update<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let mut state = self.0.borrow_mut();
        state.changed = true;
        f(&mut state.data)
    }

    /// 응답에 써야 할 세션 내용 (변경이 없으면 `None`)
    fn changes(&self) -> Option<SessionData> {
        let state = self.0.borrow();
        state.changed.then(|| state.data.clone())
    }

    /// 로그인된 세션 식별자
    pub fn identity(&self) -> Option<String> {
        self.0.borrow().data.identity.clone()
    }

    /// 세션에 사용자를 기록합니다. CSRF 토큰은 새로 발급됩니다.
    pub fn login(&self, identity: String) {
        self.update(|data| {
            data.identity = Some(identity);
            data.oauth_state = None;
            data.csrf_token = new_token();
        });
    }

    /// 세션의 사용자, OAuth 상태를 지우고 CSRF 토큰을 교체합니다.
    /// 플래시 메시지는 남겨 둡니다.
    pub fn logout(&self) {
        self.update(|data| {
            data.identity = None;
            data.oauth_state = None;
            data.csrf_token = new_token();
        });
    }

    /// 더 이상 유효하지 않은 식별자만 제거합니다.
    pub fn clear_identity(&self) {
        if self.identity().is_some() {
            self.update(|data| data.identity = None);
        }
    }

    /// 세션의 CSRF 토큰. 없으면 발급합니다.
    pub fn csrf_token(&self) -> String {
        let current = self.0.borrow().data.csrf_token.clone();
        if !current.is_empty() {
            return current;
        }

        let token = new_token();
        self.update(|data| data.csrf_token = token.clone());
        token
    }

    /// 폼으로 전달된 `_csrf` 값을 검증합니다.
    pub fn verify_csrf(&self, submitted: &str) -> Result<(), AppError> {
        let expected = self.0.borrow().data.csrf_token.clone();

        if expected.is_empty() || !constant_time_eq(expected.as_bytes(), submitted.as_bytes()) {
            log::warn!("CSRF 토큰 불일치");
            return Err(AppError::AuthorizationError(
                "요청이 만료되었습니다. 페이지를 새로고침한 뒤 다시 시도해주세요".to_string(),
            ));
        }
        Ok(())
    }

    /// 다음 페이지에 한 번 보여줄 메시지를 추가합니다.
    pub fn flash(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|data| data.flashes.push(message));
    }

    /// 쌓인 플래시 메시지를 꺼냅니다.
    pub fn take_flashes(&self) -> Vec<String> {
        if self.0.borrow().data.flashes.is_empty() {
            return Vec::new();
        }
        self.update(|data| std::mem::take(&mut data.flashes))
    }

    /// OAuth 요청용 state 를 새로 만들어 보관하고 반환합니다.
    pub fn set_oauth_state(&self, provider: AuthProvider) -> String {
        let state = new_token();
        let pending = PendingOAuth { provider, state: state.clone() };
        self.update(|data| data.oauth_state = Some(pending));
        state
    }

    /// 보관된 OAuth state 를 소비합니다. 같은 state 는 두 번 쓸 수 없습니다.
    pub fn take_oauth_state(&self) -> Option<PendingOAuth> {
        self.0.borrow().data.oauth_state.as_ref()?;
        self.update(|data| data.oauth_state.take())
    }
}

fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(session.clone())),
            None => ready(Err(AppError::InternalError(
                "세션 미들웨어가 설정되지 않았습니다".to_string(),
            )
            .into())),
        }
    }
}

/// 서명된 쿠키 세션 미들웨어
pub struct SessionMiddleware {
    secret: Rc<[u8]>,
    cookie_name: String,
    secure: bool,
}

impl SessionMiddleware {
    pub fn new(secret: impl AsRef<[u8]>, cookie_name: impl Into<String>, secure: bool) -> Self {
        Self {
            secret: Rc::from(secret.as_ref()),
            cookie_name: cookie_name.into(),
            secure,
        }
    }

    /// 환경 설정([`SessionConfig`])으로 미들웨어를 만듭니다.
    pub fn from_config(secret: &str) -> Self {
        Self::new(secret, SessionConfig::cookie_name(), SessionConfig::secure_cookie())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            key: SessionKey { secret: self.secret.clone() },
            cookie_name: self.cookie_name.clone(),
            secure: self.secure,
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    key: SessionKey,
    cookie_name: String,
    secure: bool,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let data = req
            .cookie(&self.cookie_name)
            .and_then(|cookie| {
                let opened = self.key.open(cookie.value());
                if opened.is_none() {
                    log::debug!("세션 쿠키 검증 실패, 빈 세션으로 시작");
                }
                opened
            })
            .unwrap_or_default();

        let session = Session::from_data(data);
        req.extensions_mut().insert(session.clone());

        let service = self.service.clone();
        let key = self.key.clone();
        let cookie_name = self.cookie_name.clone();
        let secure = self.secure;

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if let Some(data) = session.changes() {
                let value = key.seal(&data)?;
                let cookie = Cookie::build(cookie_name, value)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(secure)
                    .finish();

                res.response_mut()
                    .add_cookie(&cookie)
                    .map_err(actix_web::error::ErrorInternalServerError)?;
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse};

    const SECRET: &str = "test-session-secret";
    const COOKIE: &str = "oasess";

    #[test]
    fn test_seal_and_open() {
        let key = SessionKey::new(SECRET.as_bytes());
        let data = SessionData {
            identity: Some("github:42".to_string()),
            csrf_token: "csrf".to_string(),
            oauth_state: None,
            flashes: vec!["안녕하세요".to_string()],
        };

        let sealed = key.seal(&data).unwrap();
        assert_eq!(key.open(&sealed), Some(data));
    }

    #[test]
    fn test_tampered_or_foreign_cookie_is_rejected() {
        let key = SessionKey::new(SECRET.as_bytes());
        let sealed = key
            .seal(&SessionData {
                identity: Some("local:alice".to_string()),
                ..SessionData::default()
            })
            .unwrap();

        let (payload, signature) = sealed.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"{"identity":"local:admin","csrf_token":""}"#);

        assert!(key.open(&format!("{}.{}", forged_payload, signature)).is_none());
        assert!(key.open(payload).is_none());
        assert!(key.open("garbage").is_none());
        assert!(SessionKey::new(b"other-secret").open(&sealed).is_none());
    }

    #[test]
    fn test_csrf_verification() {
        let session = Session::from_data(SessionData::default());

        assert!(session.verify_csrf("").is_err());

        let token = session.csrf_token();
        assert_eq!(session.csrf_token(), token);
        assert!(session.verify_csrf(&token).is_ok());
        assert!(matches!(
            session.verify_csrf("wrong"),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_logout_rotates_csrf_and_keeps_flashes() {
        let session = Session::from_data(SessionData::default());
        session.login("local:alice".to_string());
        let before = session.csrf_token();
        session.flash("bye");

        session.logout();

        assert_eq!(session.identity(), None);
        assert_ne!(session.csrf_token(), before);
        assert_eq!(session.take_flashes(), vec!["bye".to_string()]);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_oauth_state_is_single_use() {
        let session = Session::from_data(SessionData::default());
        let state = session.set_oauth_state(AuthProvider::Kakao);

        let pending = session.take_oauth_state().unwrap();
        assert_eq!(pending.provider, AuthProvider::Kakao);
        assert_eq!(pending.state, state);
        assert!(session.take_oauth_state().is_none());
    }

    #[test]
    fn test_read_only_access_does_not_mark_changed() {
        let session = Session::from_data(SessionData {
            csrf_token: "existing".to_string(),
            ..SessionData::default()
        });

        let _ = session.identity();
        let _ = session.csrf_token();
        let _ = session.take_flashes();
        assert!(session.changes().is_none());
    }

    async fn remember(session: Session) -> HttpResponse {
        session.login("github:42".to_string());
        HttpResponse::Ok().finish()
    }

    async fn whoami(session: Session) -> HttpResponse {
        HttpResponse::Ok().body(session.identity().unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_middleware_round_trip_and_cookie_flags() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(SECRET, COOKIE, false))
                .route("/remember", web::get().to(remember))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = actix_web::test::TestRequest::get().uri("/remember").to_request();
        let res = actix_web::test::call_service(&app, req).await;
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == COOKIE)
            .unwrap()
            .into_owned();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let req = actix_web::test::TestRequest::get().uri("/whoami").cookie(cookie).to_request();
        let res = actix_web::test::call_service(&app, req).await;

        // 읽기만 한 요청은 쿠키를 다시 쓰지 않음
        assert!(res.response().cookies().next().is_none());
        let body = actix_web::test::read_body(res).await;
        assert_eq!(body, "github:42");
    }

    #[actix_web::test]
    async fn test_middleware_ignores_tampered_cookie() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(SECRET, COOKIE, false))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let forged = Cookie::new(COOKIE, "eyJpZGVudGl0eSI6ImxvY2FsOmFkbWluIn0.AAAA");
        let req = actix_web::test::TestRequest::get().uri("/whoami").cookie(forged).to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;

        assert!(body.is_empty());
    }
}
