//! # HTTP Request Handlers Module
//!
//! 브라우저 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 서비스는 `web::Data` 로 주입되고, 세션은 [`Session`](crate::middlewares::Session)
//! 추출자로 전달됩니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser (HTML 폼, OAuth 리다이렉트)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 세션 쿠키, 로그인 필수 검사
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - 폼 처리, 리다이렉트, 플래시
//! ├─────────────────────────────────────────────┤
//!   Services - 자격 증명 검증, 사용자 해석, OAuth
//! ├─────────────────────────────────────────────┤
//!   Repositories - UserStore
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리 규칙
//!
//! 사용자가 고칠 수 있는 실패(잘못된 입력, 인증 실패, 프로바이더 오류)는
//! 플래시 메시지와 함께 폼 페이지로 리다이렉트합니다. CSRF 불일치는 403,
//! 저장소 장애는 500 으로 [`AppError`](crate::errors::errors::AppError) 를 그대로 반환합니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인 페이지, 로컬 로그인, 로그아웃, OAuth 시작과 콜백
//! - **`users`**: 홈 화면, 계정 등록

/// 메모리 저장소로 전체 라우트를 띄운 테스트 앱
#[cfg(test)]
macro_rules! handler_app {
    ($store:expr, $oauth:expr) => {{
        let store: std::sync::Arc<dyn crate::repositories::users::UserStore> = $store;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(
                    crate::services::users::IdentityService::new(store.clone()),
                ))
                .app_data(actix_web::web::Data::new(crate::services::users::UserService::new(
                    store, 4,
                )))
                .app_data(actix_web::web::Data::new($oauth))
                .wrap(crate::middlewares::SessionMiddleware::new(
                    "handler-test-secret",
                    "oasess",
                    false,
                ))
                .configure(crate::routes::configure_app),
        )
        .await
    }};
}

/// `GET /login` 으로 세션 쿠키와 CSRF 토큰을 받아옵니다.
#[cfg(test)]
macro_rules! login_form {
    ($app:expr) => {{
        let res = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get().uri("/login").to_request(),
        )
        .await;
        let cookie = res.response().cookies().next().unwrap().into_owned();
        let body = actix_web::test::read_body(res).await;
        (cookie, crate::handlers::testing::csrf_from(&body))
    }};
}

/// 응답이 세션 쿠키를 갱신했으면 새 쿠키, 아니면 이전 쿠키
#[cfg(test)]
macro_rules! session_cookie {
    ($res:expr, $previous:expr) => {
        $res.response()
            .cookies()
            .next()
            .map(|cookie| cookie.into_owned())
            .unwrap_or($previous)
    };
}

pub mod auth;
pub mod users;

use actix_web::http::header::{ContentType, LOCATION};
use actix_web::HttpResponse;

/// 302 리다이렉트 응답
pub(crate) fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.into()))
        .finish()
}

/// HTML 응답
pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}
