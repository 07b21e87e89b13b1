//! 로컬 계정 등록 요청 DTO
//!
//! `/register` 폼 입력의 데이터 구조와 검증 규칙을 정의합니다.
//!
//! ## 검증 규칙
//!
//! - 아이디 (`login_id`): 1-64자, 공백 불가
//! - 비밀번호 (`password`): 4자 이상, bcrypt 입력 한계인 72바이트 이하
//! - 표시 이름 (`user_name`): 선택, 64자 이하
use std::fmt;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_optional_string;

/// 로컬 계정 등록 요청
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 로그인 아이디 (로컬 사용자의 `provider_user_id`)
    #[validate(length(min = 1, max = 64, message = "아이디는 1-64자 사이여야 합니다"))]
    #[validate(custom(function = "validate_login_id"))]
    pub login_id: String,

    #[validate(length(min = 4, message = "비밀번호는 최소 4자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_bytes"))]
    pub password: String,

    /// 표시 이름 (공백만 있으면 `None`)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "표시 이름은 64자 이하여야 합니다"))]
    pub user_name: Option<String>,

    #[serde(rename = "_csrf", default)]
    pub csrf_token: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("login_id", &self.login_id)
            .field("password", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .finish()
    }
}

/// 아이디에 공백이나 제어 문자가 없는지 검증
fn validate_login_id(login_id: &str) -> Result<(), ValidationError> {
    if login_id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new("invalid_login_id")
            .with_message("아이디에는 공백을 사용할 수 없습니다".into()));
    }
    Ok(())
}

/// bcrypt는 72바이트를 넘는 입력을 잘라내므로 그 이상은 거부
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > 72 {
        return Err(ValidationError::new("password_too_long")
            .with_message("비밀번호는 72바이트 이하여야 합니다".into()));
    }
    Ok(())
}
