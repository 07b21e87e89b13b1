//! 인증 요청관련 DTO
//!
//! 로그인 폼, 로그아웃 폼, OAuth 콜백 쿼리를 매핑합니다.
use std::fmt;

use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체 (`POST /auth/local`)
#[derive(Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(length(min = 1, message = "아이디를 입력해주세요"))]
    pub login_id: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    #[serde(rename = "_csrf", default)]
    pub csrf_token: String,
}

impl fmt::Debug for LocalLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalLoginRequest")
            .field("login_id", &self.login_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// CSRF 토큰만 담는 폼 (`POST /logout`)
#[derive(Debug, Deserialize)]
pub struct CsrfForm {
    #[serde(rename = "_csrf", default)]
    pub csrf_token: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 전달됩니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}
