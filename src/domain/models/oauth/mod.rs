//! OAuth 프로바이더 통합 모델
//!
//! 토큰 엔드포인트 응답과 프로바이더별 사용자 프로필 모델을 제공합니다.

pub mod provider_profile;
pub mod token_response;

pub use provider_profile::{NormalizedProfile, RawProviderProfile, SubjectId};
pub use token_response::{OAuthTokenResponse, TokenError};
