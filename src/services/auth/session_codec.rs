//! 세션 식별자 코덱
//!
//! 세션 쿠키에는 사용자 레코드 대신 `"{provider}:{provider_user_id}"` 형태의
//! 문자열 하나만 저장됩니다. 이 모듈은 그 문자열을 만들고 해석합니다.
//!
//! ```rust,ignore
//! let token = SessionIdentityCodec::encode(&user);      // "github:42"
//! let (provider, id) = SessionIdentityCodec::decode(&token)?;
//! ```
//!
//! 구분자는 첫 번째 `:` 입니다. 로컬 아이디나 프로바이더 식별자에
//! `:` 가 포함되어 있어도 뒷부분 전체가 식별자로 복원됩니다.

use std::str::FromStr;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

const SEPARATOR: char = ':';

/// `provider:provider_user_id` 인코더/디코더
pub struct SessionIdentityCodec;

impl SessionIdentityCodec {
    /// 사용자를 세션 식별자로 인코딩합니다.
    pub fn encode(user: &User) -> String {
        Self::encode_parts(user.provider, &user.provider_user_id)
    }

    pub fn encode_parts(provider: AuthProvider, provider_user_id: &str) -> String {
        format!("{}{}{}", provider.as_str(), SEPARATOR, provider_user_id)
    }

    /// 세션 식별자를 `(provider, provider_user_id)` 로 디코딩합니다.
    ///
    /// 구분자가 없거나, 알 수 없는 프로바이더이거나, 식별자가 비어 있으면
    /// `NotFound` 를 반환합니다. 호출자는 이를 세션 만료로 취급합니다.
    pub fn decode(token: &str) -> Result<(AuthProvider, String), AppError> {
        let invalid = || AppError::NotFound("세션이 더 이상 유효하지 않습니다".to_string());

        let (provider, provider_user_id) = token.split_once(SEPARATOR).ok_or_else(invalid)?;
        let provider = AuthProvider::from_str(provider).map_err(|_| invalid())?;

        if provider_user_id.is_empty() {
            return Err(invalid());
        }

        Ok((provider, provider_user_id.to_string()))
    }
}
