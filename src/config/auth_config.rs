//! # Authentication Configuration Module
//!
//! 인증 프로바이더, OAuth 클라이언트, 세션 쿠키 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 아이디/패스워드 기반 인증
//! 2. **OAuth 2.0**: GitHub, Google, Kakao, Facebook, Instagram
//!
//! ## 프로바이더별 환경 변수
//!
//! 각 OAuth 프로바이더는 세 가지 값이 모두 설정되어야 활성화됩니다.
//! 하나라도 비어 있으면 해당 프로바이더의 라우트만 비활성화되고
//! 서버는 정상적으로 동작합니다.
//!
//! ```bash
//! export GITHUB_CLIENT_ID="..."
//! export GITHUB_CLIENT_SECRET="..."
//! export GITHUB_CALLBACK_URL="http://localhost:3000/auth/github/callback"
//!
//! export KAKAO_CLIENT_ID="..."
//! export KAKAO_CLIENT_SECRET="..."
//! export KAKAO_CALLBACK_URL="http://localhost:3000/auth/kakao/callback"
//! ```
//!
//! ## 세션 설정
//!
//! ```bash
//! # 세션 쿠키 서명 키 (재시작 후에도 동일해야 기존 세션이 유지됩니다)
//! export SESSION_SECRET="your-session-secret"
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::config::Environment;

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// 사용자 레코드의 `provider` 필드에 소문자 문자열로 저장되며,
/// 세션 식별자 토큰의 앞부분이 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 아이디/패스워드 인증 (bcrypt 해시 저장)
    Local,
    /// GitHub OAuth
    GitHub,
    /// Google OAuth 2.0
    Google,
    /// Kakao 로그인
    Kakao,
    /// Facebook 로그인
    Facebook,
    /// Instagram Basic Display
    Instagram,
}

impl AuthProvider {
    /// OAuth 로그인을 제공하는 프로바이더 목록 (로그인 페이지 표시 순서)
    pub const OAUTH: [AuthProvider; 5] = [
        AuthProvider::GitHub,
        AuthProvider::Google,
        AuthProvider::Kakao,
        AuthProvider::Facebook,
        AuthProvider::Instagram,
    ];

    /// AuthProvider를 소문자 문자열로 변환합니다.
    ///
    /// ```rust,ignore
    /// assert_eq!(AuthProvider::Kakao.as_str(), "kakao");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::GitHub => "github",
            AuthProvider::Google => "google",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Facebook => "facebook",
            AuthProvider::Instagram => "instagram",
        }
    }

    /// 화면에 표시할 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            AuthProvider::Local => "Local",
            AuthProvider::GitHub => "GitHub",
            AuthProvider::Google => "Google",
            AuthProvider::Kakao => "Kakao",
            AuthProvider::Facebook => "Facebook",
            AuthProvider::Instagram => "Instagram",
        }
    }

    pub fn is_oauth(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }

    /// 프로바이더의 OAuth 엔드포인트를 반환합니다. `Local`은 `None`입니다.
    pub fn endpoints(&self) -> Option<ProviderEndpoints> {
        let endpoints = match self {
            AuthProvider::Local => return None,
            AuthProvider::GitHub => ProviderEndpoints {
                authorize_url: "https://github.com/login/oauth/authorize",
                token_url: "https://github.com/login/oauth/access_token",
                profile_url: "https://api.github.com/user",
                scope: None,
            },
            AuthProvider::Google => ProviderEndpoints {
                authorize_url: "https://accounts.google.com/o/oauth2/v2/auth",
                token_url: "https://oauth2.googleapis.com/token",
                profile_url: "https://www.googleapis.com/oauth2/v2/userinfo",
                scope: Some("profile"),
            },
            AuthProvider::Kakao => ProviderEndpoints {
                authorize_url: "https://kauth.kakao.com/oauth/authorize",
                token_url: "https://kauth.kakao.com/oauth/token",
                profile_url: "https://kapi.kakao.com/v2/user/me",
                scope: None,
            },
            AuthProvider::Facebook => ProviderEndpoints {
                authorize_url: "https://www.facebook.com/v19.0/dialog/oauth",
                token_url: "https://graph.facebook.com/v19.0/oauth/access_token",
                profile_url: "https://graph.facebook.com/v19.0/me?fields=id,name,picture",
                scope: None,
            },
            AuthProvider::Instagram => ProviderEndpoints {
                authorize_url: "https://api.instagram.com/oauth/authorize",
                token_url: "https://api.instagram.com/oauth/access_token",
                profile_url: "https://graph.instagram.com/me?fields=id,username",
                scope: Some("user_profile"),
            },
        };

        Some(endpoints)
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    /// 문자열에서 AuthProvider를 생성합니다. 대소문자는 구분하지 않습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "github" => Ok(AuthProvider::GitHub),
            "google" => Ok(AuthProvider::Google),
            "kakao" => Ok(AuthProvider::Kakao),
            "facebook" => Ok(AuthProvider::Facebook),
            "instagram" => Ok(AuthProvider::Instagram),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth 프로바이더의 고정 엔드포인트
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderEndpoints {
    /// 사용자를 리디렉션할 인증 페이지
    pub authorize_url: &'static str,
    /// authorization code → access token 교환
    pub token_url: &'static str,
    /// access token으로 프로필 조회
    pub profile_url: &'static str,
    /// 요청할 스코프 (없으면 프로바이더 기본값)
    pub scope: Option<&'static str>,
}

/// 프로바이더 하나의 OAuth 클라이언트 등록 정보
///
/// client secret은 `Debug` 출력에서 가려집니다.
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl OAuthClientConfig {
    /// `{PROVIDER}_CLIENT_ID`, `{PROVIDER}_CLIENT_SECRET`, `{PROVIDER}_CALLBACK_URL`
    /// 환경 변수에서 클라이언트 정보를 읽습니다.
    ///
    /// 셋 중 하나라도 없거나 비어 있으면 `None`을 반환합니다.
    pub fn from_env(provider: AuthProvider) -> Option<Self> {
        Self::from_lookup(provider, |key| env::var(key).ok())
    }

    /// 임의의 조회 함수로부터 클라이언트 정보를 만듭니다.
    pub fn from_lookup<F>(provider: AuthProvider, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !provider.is_oauth() {
            return None;
        }

        let prefix = provider.as_str().to_uppercase();
        let read = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Some(Self {
            provider,
            client_id: read("CLIENT_ID")?,
            client_secret: read("CLIENT_SECRET")?,
            callback_url: read("CALLBACK_URL")?,
        })
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("provider", &self.provider)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// 서명된 세션 쿠키 설정
pub struct SessionConfig;

impl SessionConfig {
    const DEV_SECRET: &'static str = "development-session-secret-change-me";

    /// 세션 쿠키 이름. 기본값: "oasess"
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "oasess".to_string())
    }

    /// 세션 서명 키를 반환합니다.
    ///
    /// `SESSION_SECRET`, 없으면 `SECRET`을 읽습니다. 둘 다 없으면
    /// 프로덕션에서는 에러, 그 외 환경에서는 경고 후 개발용 기본값을 사용합니다.
    pub fn secret() -> Result<String, String> {
        let configured = env::var("SESSION_SECRET")
            .or_else(|_| env::var("SECRET"))
            .ok()
            .filter(|s| !s.is_empty());

        match configured {
            Some(secret) => Ok(secret),
            None if Environment::current().is_production() => {
                Err("SESSION_SECRET must be set in production".to_string())
            }
            None => {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                Ok(Self::DEV_SECRET.to_string())
            }
        }
    }

    /// 쿠키에 `Secure` 속성을 붙일지 여부 (프로덕션에서만)
    pub fn secure_cookie() -> bool {
        Environment::current().is_production()
    }
}
