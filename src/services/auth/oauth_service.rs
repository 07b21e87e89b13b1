//! # OAuth 2.0 인증 서비스
//!
//! GitHub, Google, Kakao, Facebook, Instagram 의 Authorization Code Flow 를
//! 하나의 서비스로 처리합니다. 프로바이더별 차이는 엔드포인트와
//! 프로필 응답 모양뿐이며, 나머지 흐름은 모두 같습니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! 브라우저                      우리 서버                         프로바이더
//!    │ GET /auth/{provider}        │                                  │
//!    ├────────────────────────────►│ state 생성, 세션에 저장            │
//!    │ 302 authorize_url           │                                  │
//!    │◄────────────────────────────┤                                  │
//!    │ 로그인 및 동의               │                                  │
//!    ├───────────────────────────────────────────────────────────────►│
//!    │ 302 callback?code&state     │                                  │
//!    │◄───────────────────────────────────────────────────────────────┤
//!    │ GET /auth/{provider}/callback                                  │
//!    ├────────────────────────────►│ state 검증                        │
//!    │                             │ POST token_url (code → token)    │
//!    │                             ├─────────────────────────────────►│
//!    │                             │ GET profile_url (Bearer token)   │
//!    │                             ├─────────────────────────────────►│
//!    │                             │ 프로필 정규화 → 사용자 해석         │
//!    │ 302 /                       │                                  │
//!    │◄────────────────────────────┤                                  │
//! ```
//!
//! ## 보안 고려사항
//!
//! - `state` 는 요청마다 새로 생성되어 세션에 보관되고, 콜백에서 한 번만 소비됩니다.
//! - client secret 과 액세스 토큰은 로그에 남기지 않습니다.

use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::ACCEPT;

use crate::config::{AuthProvider, OAuthClientConfig, ProviderEndpoints};
use crate::domain::models::oauth::{NormalizedProfile, OAuthTokenResponse, RawProviderProfile};
use crate::errors::errors::AppError;

/// 모든 프로바이더 호출에 공유되는 HTTP 클라이언트
///
/// GitHub API 는 `User-Agent` 헤더가 없으면 요청을 거부합니다.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("oauth_login_service/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
});

/// 다중 프로바이더 OAuth 클라이언트
///
/// 설정된 프로바이더만 보관합니다. 설정이 없는 프로바이더에 대한 요청은
/// `NotFound` 로 거절되며, 서버는 계속 동작합니다.
#[derive(Clone)]
pub struct OAuthService {
    clients: HashMap<AuthProvider, OAuthClientConfig>,
    http: reqwest::Client,
}

impl OAuthService {
    pub fn new(configs: impl IntoIterator<Item = OAuthClientConfig>) -> Self {
        let clients = configs
            .into_iter()
            .filter(|config| config.provider.is_oauth())
            .map(|config| (config.provider, config))
            .collect();

        Self {
            clients,
            http: HTTP_CLIENT.clone(),
        }
    }

    /// 환경 변수에서 모든 프로바이더 설정을 읽습니다.
    ///
    /// 값이 빠진 프로바이더는 경고 로그만 남기고 비활성화합니다.
    pub fn from_env() -> Self {
        let configs = AuthProvider::OAUTH.into_iter().filter_map(|provider| {
            let config = OAuthClientConfig::from_env(provider);
            if config.is_none() {
                log::warn!(
                    "{} OAuth 설정이 없어 비활성화합니다 ({}_CLIENT_ID / _CLIENT_SECRET / _CALLBACK_URL)",
                    provider.display_name(),
                    provider.as_str().to_uppercase()
                );
            }
            config
        });

        Self::new(configs)
    }

    pub fn is_configured(&self, provider: AuthProvider) -> bool {
        self.clients.contains_key(&provider)
    }

    /// 설정된 프로바이더 목록 (로그인 페이지 표시 순서)
    pub fn configured_providers(&self) -> Vec<AuthProvider> {
        AuthProvider::OAUTH
            .into_iter()
            .filter(|provider| self.is_configured(*provider))
            .collect()
    }

    fn client(&self, provider: AuthProvider) -> Result<(&OAuthClientConfig, ProviderEndpoints), AppError> {
        let not_configured = || {
            AppError::NotFound(format!(
                "{} 로그인이 설정되어 있지 않습니다",
                provider.display_name()
            ))
        };

        let config = self.clients.get(&provider).ok_or_else(not_configured)?;
        let endpoints = provider.endpoints().ok_or_else(not_configured)?;
        Ok((config, endpoints))
    }

    /// 프로바이더 인증 페이지 URL 을 만듭니다.
    pub fn authorize_url(&self, provider: AuthProvider, state: &str) -> Result<String, AppError> {
        let (config, endpoints) = self.client(provider)?;

        let mut params = vec![
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.callback_url.as_str()),
            ("response_type", "code"),
            ("state", state),
        ];
        if let Some(scope) = endpoints.scope {
            params.push(("scope", scope));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", endpoints.authorize_url, query_string))
    }

    /// Authorization code 를 액세스 토큰으로 교환합니다.
    pub async fn exchange_code(&self, provider: AuthProvider, code: &str) -> Result<String, AppError> {
        let (config, endpoints) = self.client(provider)?;
        let name = provider.display_name();

        let params = [
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", config.callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(endpoints.token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", name, e)))?;

        let status = response.status();
        let token_response = response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", name, e)))?;

        if let Some(error) = token_response.error.as_ref() {
            let code = error.code();
            let description = token_response.error_message().unwrap_or_default();
            log::warn!("{} 토큰 교환 거부: {} {}", name, code, description);
            return Err(AppError::AuthenticationError(format!(
                "{} 인증에 실패했습니다 ({})",
                name, code
            )));
        }

        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: HTTP {}",
                name, status
            )));
        }

        token_response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError(format!("{} 액세스 토큰이 없습니다", name)))
    }

    /// 액세스 토큰으로 프로필을 조회해 정규화합니다.
    pub async fn fetch_profile(
        &self,
        provider: AuthProvider,
        access_token: &str,
    ) -> Result<NormalizedProfile, AppError> {
        let (_, endpoints) = self.client(provider)?;
        let name = provider.display_name();

        let mut request = self
            .http
            .get(endpoints.profile_url)
            .header(ACCEPT, "application/json")
            .bearer_auth(access_token);

        // Instagram Graph 는 쿼리 파라미터 토큰만 받습니다
        if provider == AuthProvider::Instagram {
            request = request.query(&[("access_token", access_token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", name, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("{} 사용자 정보 조회 실패: HTTP {} {}", name, status, error_text);
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: HTTP {}",
                name, status
            )));
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", name, e)))?;

        RawProviderProfile::parse(provider, value)?.normalize()
    }

    /// 코드 교환과 프로필 조회를 한 번에 수행합니다.
    ///
    /// 반환값: `(정규화된 프로필, 액세스 토큰)`
    pub async fn authenticate(
        &self,
        provider: AuthProvider,
        code: &str,
    ) -> Result<(NormalizedProfile, String), AppError> {
        let access_token = self.exchange_code(provider, code).await?;
        let profile = self.fetch_profile(provider, &access_token).await?;

        log::info!("{} 프로필 조회 성공: {}", provider.display_name(), profile.provider_user_id);
        Ok((profile, access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: AuthProvider) -> OAuthClientConfig {
        OAuthClientConfig {
            provider,
            client_id: "client id".to_string(),
            client_secret: "secret".to_string(),
            callback_url: format!("http://localhost:3000/auth/{}/callback", provider),
        }
    }

    #[test]
    fn test_authorize_url_is_encoded() {
        let service = OAuthService::new([config(AuthProvider::GitHub)]);
        let url = service.authorize_url(AuthProvider::GitHub, "state-1").unwrap();

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=client%20id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgithub%2Fcallback"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=state-1"));
        assert!(!url.contains("scope="));
    }

    #[test]
    fn test_authorize_url_includes_scope_when_required() {
        let service = OAuthService::new([config(AuthProvider::Google)]);
        let url = service.authorize_url(AuthProvider::Google, "s").unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("scope=profile"));
    }

    #[test]
    fn test_unconfigured_provider_is_not_found() {
        let service = OAuthService::new([config(AuthProvider::Kakao)]);

        assert!(matches!(
            service.authorize_url(AuthProvider::Facebook, "s"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.authorize_url(AuthProvider::Local, "s"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_configured_providers_keep_display_order() {
        let service = OAuthService::new([
            config(AuthProvider::Instagram),
            config(AuthProvider::GitHub),
            config(AuthProvider::Kakao),
        ]);

        assert_eq!(
            service.configured_providers(),
            vec![AuthProvider::GitHub, AuthProvider::Kakao, AuthProvider::Instagram]
        );
        assert!(!service.is_configured(AuthProvider::Google));
    }

    #[actix_web::test]
    async fn test_exchange_for_unconfigured_provider_fails_without_network() {
        let service = OAuthService::new(Vec::new());
        let result = service.exchange_code(AuthProvider::GitHub, "code").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
