use serde::Deserialize;

/// OAuth 토큰 엔드포인트 응답
///
/// GitHub 은 실패 시에도 200 으로 `error` 필드를 돌려주므로
/// 모든 필드를 선택값으로 받습니다.
#[derive(Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub error: Option<TokenError>,
    pub error_description: Option<String>,
}

/// 토큰 에러 표현
///
/// 대부분은 `"error": "invalid_grant"` 처럼 문자열이고,
/// Facebook 은 `"error": { "message", "type", "code" }` 객체로 돌려줍니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TokenError {
    Code(String),
    Detailed {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        code: Option<i64>,
    },
}

impl TokenError {
    /// 로그와 사용자 메시지에 쓰는 짧은 에러 코드
    pub fn code(&self) -> String {
        match self {
            TokenError::Code(code) => code.clone(),
            TokenError::Detailed { kind, code, .. } => match (kind, code) {
                (Some(kind), Some(code)) => format!("{} {}", kind, code),
                (Some(kind), None) => kind.clone(),
                (None, Some(code)) => code.to_string(),
                (None, None) => "unknown_error".to_string(),
            },
        }
    }
}

impl OAuthTokenResponse {
    /// 에러 설명 (`error_description` 또는 객체형 에러의 `message`)
    pub fn error_message(&self) -> Option<&str> {
        match (&self.error_description, &self.error) {
            (Some(description), _) => Some(description.as_str()),
            (None, Some(TokenError::Detailed { message, .. })) => message.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for OAuthTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("error", &self.error)
            .field("error_description", &self.error_description)
            .finish()
    }
}
