//! 인증 관련 서비스
//!
//! - [`session_codec`] - 세션 식별자 `provider:provider_user_id`
//! - [`oauth_service`] - 프로바이더 인증 URL, 토큰 교환, 프로필 조회

pub mod session_codec;
pub mod oauth_service;

pub use session_codec::SessionIdentityCodec;
pub use oauth_service::OAuthService;
