//! 요청 단위 인증 사용자
//!
//! `LoginRequired` 미들웨어가 세션 식별자를 사용자로 복원한 뒤
//! request extensions 에 넣어 두는 값입니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::entities::users::user::User;

/// 세션에서 복원된 현재 사용자
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `LoginRequired` 로 감싸지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
