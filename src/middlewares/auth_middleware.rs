//! 로그인 필수 접근 제어 미들웨어
//!
//! 세션 식별자를 사용자로 복원해 [`CurrentUser`](crate::domain::models::auth::CurrentUser)
//! 로 request extensions 에 저장합니다.
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 식별자 없음 | 302 `/login` |
//! | 식별자가 가리키는 사용자 없음 | 식별자 제거 후 302 `/login` |
//! | 저장소 오류 | 500 |
//! | 사용자 확인 | 핸들러 실행 |
//!
//! [`SessionMiddleware`](crate::middlewares::SessionMiddleware) 안쪽에서 사용해야 하며,
//! `web::Data<IdentityService>` 가 앱에 등록되어 있어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::LoginRequiredService;

/// 로그인 필수 미들웨어
pub struct LoginRequired {
    /// 비로그인 사용자를 보낼 경로
    login_path: &'static str,
}

impl LoginRequired {
    pub fn new() -> Self {
        Self { login_path: "/login" }
    }
}

impl Default for LoginRequired {
    fn default() -> Self {
        Self::new()
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = LoginRequiredService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredService {
            service: Rc::new(service),
            login_path: self.login_path,
        }))
    }
}
