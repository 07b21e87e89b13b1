//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 세션 미들웨어 (SessionMiddleware)
//! - HMAC 서명된 쿠키에서 세션을 복원하고 변경 시 다시 기록
//! - 핸들러는 [`Session`] 추출자로 식별자, CSRF 토큰, 플래시 메시지를 다룸
//!
//! ### 2. 로그인 필수 미들웨어 (LoginRequired)
//! - 세션 식별자를 사용자로 복원해 `CurrentUser` 로 저장
//! - 비로그인 또는 만료된 식별자는 `/login` 으로 리다이렉트
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::{LoginRequired, SessionMiddleware};
//!
//! App::new()
//!     .app_data(identity_service.clone())
//!     .wrap(SessionMiddleware::from_config(&secret)) // 모든 라우트에 세션
//!     .service(
//!         web::resource("/")
//!             .wrap(LoginRequired::new())             // 보호된 라우트에만 로그인 필수
//!             .route(web::get().to(home)),
//!     )
//! ```

pub mod session;
pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::LoginRequired;
pub use session::{Session, SessionMiddleware};
