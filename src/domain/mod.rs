//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 사용자 엔티티와 경계 데이터 구조를 담당합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 저장소에 영속되는 사용자 레코드
//! ├── dto       - HTTP 폼/쿼리 요청과 외부 노출용 응답
//! └── models    - OAuth 프로필, 요청 단위 인증 사용자
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::models::oauth::RawProviderProfile;
//!
//! // 프로바이더 응답 → 정규화된 프로필 → 사용자 해석
//! let profile = RawProviderProfile::parse(AuthProvider::GitHub, json)?.normalize()?;
//! let user = identity_service.resolve_profile(profile, Some(access_token)).await?;
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::{NewUser, User};
pub use dto::users::{CsrfForm, LocalLoginRequest, OAuthCallbackQuery, RegisterRequest, UserResponse};
