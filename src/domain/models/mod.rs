//! # Domain Models Module
//!
//! 저장소에 직접 저장되지 않는 도메인 모델을 정의합니다.
//!
//! - [`auth`] - 요청 처리 중 인증된 사용자 ([`CurrentUser`](auth::CurrentUser))
//! - [`oauth`] - OAuth 프로바이더 응답과 정규화된 프로필

pub mod auth;
pub mod oauth;
