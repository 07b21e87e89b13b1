//! OAuth 로그인 서비스
//!
//! 로컬 아이디/비밀번호와 OAuth 프로바이더(github, google, kakao, facebook,
//! instagram) 로그인을 하나의 사용자 모델로 통합하는 웹 애플리케이션입니다.
//!
//! # Features
//!
//! - **사용자 해석**: `(provider, provider_user_id)` 쌍으로 찾기-또는-생성
//! - **로컬 계정**: bcrypt 해시 저장, 등록 후 바로 로그인
//! - **OAuth 2.0**: 인가 코드 교환과 프로바이더별 프로필 정규화
//! - **세션**: HMAC 서명 쿠키, `provider:provider_user_id` 식별자, CSRF 토큰, 플래시 메시지
//! - **저장소**: MongoDB `user` 컬렉션 (고유 인덱스) 또는 메모리 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Middlewares   │ ← 세션 쿠키, 로그인 필수 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 폼 처리, 리다이렉트, HTML 뷰
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 자격 증명 검증, 사용자 해석, OAuth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore (MongoDB / 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oauth_login_service::repositories::users::MemoryUserStore;
//! use oauth_login_service::services::users::IdentityService;
//!
//! let identities = IdentityService::new(Arc::new(MemoryUserStore::new()));
//! let user = identities.resolve(candidate).await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
#[macro_use]
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;
