//! OAuth 프로바이더 프로필 모델
//!
//! 각 프로바이더의 사용자 정보 API 응답을 그대로 받는 원본 모델과,
//! 저장소가 이해하는 형태로 정규화한 [`NormalizedProfile`]을 정의합니다.
//!
//! | 프로바이더 | 식별자 | 아바타 | 이름 |
//! |-----------|--------|--------|------|
//! | GitHub | `id` | `avatar_url` | `login` |
//! | Google | `id` / `sub` | `picture` | `name` |
//! | Kakao | `id` | `properties.profile_image` | `properties.nickname` |
//! | Facebook | `id` | `picture.data.url` | `name` |
//! | Instagram | `id` | - | `username` |

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::errors::errors::AppError;

/// 프로바이더가 보내는 사용자 식별자
///
/// GitHub, Kakao는 숫자로, Google, Facebook, Instagram은 문자열로 보냅니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Number(u64),
    Text(String),
}

impl SubjectId {
    fn into_string(self) -> String {
        match self {
            SubjectId::Number(n) => n.to_string(),
            SubjectId::Text(s) => s.trim().to_string(),
        }
    }
}

/// GitHub `GET /user` 응답
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubProfile {
    pub id: Option<SubjectId>,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

/// Google userinfo 응답 (v2 는 `id`, OpenID Connect 는 `sub`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleProfile {
    pub id: Option<SubjectId>,
    pub sub: Option<SubjectId>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProperties {
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}

/// Kakao `GET /v2/user/me` 응답
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProfile {
    pub id: Option<SubjectId>,
    #[serde(default)]
    pub properties: Option<KakaoProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacebookPictureData {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacebookPicture {
    pub data: Option<FacebookPictureData>,
}

/// Facebook Graph `me?fields=id,name,picture` 응답
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacebookProfile {
    pub id: Option<SubjectId>,
    pub name: Option<String>,
    pub picture: Option<FacebookPicture>,
}

/// Instagram Graph `me?fields=id,username` 응답
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstagramProfile {
    pub id: Option<SubjectId>,
    pub username: Option<String>,
}

/// 프로바이더별 원본 프로필
#[derive(Debug, Clone)]
pub enum RawProviderProfile {
    GitHub(GitHubProfile),
    Google(GoogleProfile),
    Kakao(KakaoProfile),
    Facebook(FacebookProfile),
    Instagram(InstagramProfile),
}

/// 정규화된 프로필
///
/// 식별자 해석기(IdentityService)에 그대로 전달되는 값입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub provider: AuthProvider,
    /// 비어 있지 않은 프로바이더 사용자 식별자
    pub provider_user_id: String,
    pub avatar_url: Option<String>,
    pub user_name: Option<String>,
}

impl RawProviderProfile {
    /// 프로바이더 응답 JSON을 해당 프로바이더의 모델로 해석합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - `Local` 처럼 OAuth가 아닌 프로바이더
    /// * `ExternalServiceError` - 응답 형식이 모델과 맞지 않음
    pub fn parse(provider: AuthProvider, value: serde_json::Value) -> Result<Self, AppError> {
        let shape_error = |e: serde_json::Error| {
            AppError::ExternalServiceError(format!("{} 프로필 응답 형식 오류: {}", provider.display_name(), e))
        };

        let profile = match provider {
            AuthProvider::Local => {
                return Err(AppError::ValidationError(
                    "로컬 계정은 OAuth 프로필이 없습니다".to_string(),
                ));
            }
            AuthProvider::GitHub => {
                RawProviderProfile::GitHub(serde_json::from_value(value).map_err(shape_error)?)
            }
            AuthProvider::Google => {
                RawProviderProfile::Google(serde_json::from_value(value).map_err(shape_error)?)
            }
            AuthProvider::Kakao => {
                RawProviderProfile::Kakao(serde_json::from_value(value).map_err(shape_error)?)
            }
            AuthProvider::Facebook => {
                RawProviderProfile::Facebook(serde_json::from_value(value).map_err(shape_error)?)
            }
            AuthProvider::Instagram => {
                RawProviderProfile::Instagram(serde_json::from_value(value).map_err(shape_error)?)
            }
        };

        Ok(profile)
    }

    pub fn provider(&self) -> AuthProvider {
        match self {
            RawProviderProfile::GitHub(_) => AuthProvider::GitHub,
            RawProviderProfile::Google(_) => AuthProvider::Google,
            RawProviderProfile::Kakao(_) => AuthProvider::Kakao,
            RawProviderProfile::Facebook(_) => AuthProvider::Facebook,
            RawProviderProfile::Instagram(_) => AuthProvider::Instagram,
        }
    }

    /// 프로필을 `(식별자, 아바타, 이름)` 으로 정규화합니다.
    ///
    /// 식별자가 없거나 비어 있으면 `AuthenticationError`를 반환합니다.
    /// 이 실패는 해당 로그인 시도에만 영향을 줍니다.
    pub fn normalize(self) -> Result<NormalizedProfile, AppError> {
        let provider = self.provider();

        let (subject, avatar_url, user_name) = match self {
            RawProviderProfile::GitHub(p) => (p.id, p.avatar_url, p.login),
            RawProviderProfile::Google(p) => (p.id.or(p.sub), p.picture, p.name),
            RawProviderProfile::Kakao(p) => {
                let props = p.properties.unwrap_or_default();
                (p.id, props.profile_image, props.nickname)
            }
            RawProviderProfile::Facebook(p) => {
                let avatar = p.picture.and_then(|pic| pic.data).and_then(|data| data.url);
                (p.id, avatar, p.name)
            }
            RawProviderProfile::Instagram(p) => (p.id, None, p.username),
        };

        let provider_user_id = subject
            .map(SubjectId::into_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppError::AuthenticationError(format!(
                    "{} 프로필에 사용자 식별자가 없습니다",
                    provider.display_name()
                ))
            })?;

        Ok(NormalizedProfile {
            provider,
            provider_user_id,
            avatar_url: non_empty(avatar_url),
            user_name: non_empty(user_name),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(provider: AuthProvider, value: serde_json::Value) -> Result<NormalizedProfile, AppError> {
        RawProviderProfile::parse(provider, value)?.normalize()
    }

    #[test]
    fn test_github_numeric_id() {
        let profile = normalize(
            AuthProvider::GitHub,
            json!({ "id": 42, "login": "octo", "avatar_url": "https://a/42.png" }),
        )
        .unwrap();

        assert_eq!(profile.provider_user_id, "42");
        assert_eq!(profile.user_name.as_deref(), Some("octo"));
        assert_eq!(profile.avatar_url.as_deref(), Some("https://a/42.png"));
    }

    #[test]
    fn test_google_sub_fallback() {
        let profile = normalize(
            AuthProvider::Google,
            json!({ "sub": "1098", "name": "Kim", "picture": "https://g/p.jpg" }),
        )
        .unwrap();

        assert_eq!(profile.provider, AuthProvider::Google);
        assert_eq!(profile.provider_user_id, "1098");
        assert_eq!(profile.user_name.as_deref(), Some("Kim"));
    }

    #[test]
    fn test_kakao_properties() {
        let profile = normalize(
            AuthProvider::Kakao,
            json!({
                "id": 123456789,
                "properties": { "nickname": "라이언", "profile_image": "http://k/p.jpg" }
            }),
        )
        .unwrap();

        assert_eq!(profile.provider_user_id, "123456789");
        assert_eq!(profile.user_name.as_deref(), Some("라이언"));
        assert_eq!(profile.avatar_url.as_deref(), Some("http://k/p.jpg"));
    }

    #[test]
    fn test_kakao_without_properties() {
        let profile = normalize(AuthProvider::Kakao, json!({ "id": 7 })).unwrap();
        assert_eq!(profile.user_name, None);
        assert_eq!(profile.avatar_url, None);
    }

    #[test]
    fn test_facebook_nested_picture() {
        let profile = normalize(
            AuthProvider::Facebook,
            json!({
                "id": "10224",
                "name": "Mark",
                "picture": { "data": { "url": "https://fb/p.jpg", "height": 50 } }
            }),
        )
        .unwrap();

        assert_eq!(profile.avatar_url.as_deref(), Some("https://fb/p.jpg"));
    }

    #[test]
    fn test_instagram_has_no_avatar() {
        let profile = normalize(
            AuthProvider::Instagram,
            json!({ "id": "1789", "username": "insta_user" }),
        )
        .unwrap();

        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.user_name.as_deref(), Some("insta_user"));
    }

    #[test]
    fn test_missing_or_empty_id_is_authentication_error() {
        let missing = normalize(AuthProvider::GitHub, json!({ "login": "octo" }));
        assert!(matches!(missing, Err(AppError::AuthenticationError(_))));

        let empty = normalize(AuthProvider::Facebook, json!({ "id": "  ", "name": "x" }));
        assert!(matches!(empty, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_malformed_shape_is_external_error() {
        let result = RawProviderProfile::parse(AuthProvider::GitHub, json!({ "id": { "nested": 1 } }));
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[test]
    fn test_local_has_no_profile() {
        let result = RawProviderProfile::parse(AuthProvider::Local, json!({}));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
