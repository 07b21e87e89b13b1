//! 사용자 관련 서비스
//!
//! - [`identity_service`] - 프로바이더 식별자 → 사용자 레코드 해석
//! - [`user_service`] - 로컬 계정 등록과 로그인 검증

pub mod identity_service;
pub mod user_service;

pub use identity_service::IdentityService;
pub use user_service::UserService;
