//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 로그인 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! HTML 페이지 핸들러는 사용자에게 보여줄 실패(인증 실패, 입력 오류 등)를
//! 플래시 메시지와 리다이렉트로 변환하고, 그 밖의 에러만 이 타입의
//! `ResponseError` 구현을 통해 JSON 응답으로 나갑니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn load(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 로그인 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 프로세스를 종료시키는 에러는 없으며, 모든 에러는 HTTP 응답으로 귀결됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 저장소 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 세션 또는 사용자를 찾을 수 없음 (404 Not Found)
    ///
    /// 세션 식별자가 더 이상 유효하지 않은 경우에도 사용됩니다.
    /// 호출자는 이를 "세션 만료"로 취급해야 합니다.
    #[error("Not found: {0}")]
    NotFound(String),

    /// (provider, provider_user_id) 유니크 제약 위반 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// CSRF 토큰 불일치 등 요청 거부 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// OAuth 프로바이더 통신 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 저장소/내부 에러는 상세 메시지를 노출하지 않고 일반 문구로 응답합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let message = match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요".to_string()
            }
            other => other.to_string(),
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": message
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}
