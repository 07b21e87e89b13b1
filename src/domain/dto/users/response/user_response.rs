use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// 사용자 응답 DTO
///
/// 화면 렌더링과 JSON 응답에 쓰이는 외부 노출용 사용자 정보입니다.
/// `access_token`(OAuth 토큰 또는 비밀번호 해시)은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub provider: AuthProvider,
    pub provider_user_id: String,
    /// 표시 이름 (없으면 provider_user_id)
    pub display_name: String,
    pub avatar_url: Option<String>,

    /// OAuth 사용자인지 여부 (편의 필드)
    pub is_oauth_user: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let display_name = user.display_name().to_string();
        let User {
            id,
            provider,
            provider_user_id,
            avatar_url,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            provider,
            provider_user_id,
            display_name,
            avatar_url,
            is_oauth_user: provider.is_oauth(),
        }
    }
}
