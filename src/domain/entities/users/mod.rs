//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::NewUser;
//!
//! // 로컬 사용자 (비밀번호는 해시로 저장)
//! let new_user = NewUser::local("alice".to_string(), password_hash, Some("Alice".to_string()));
//! ```

pub mod user;

pub use user::{NewUser, User};
