//! # Domain Entities Module
//!
//! MongoDB `user` 컬렉션 문서와 1:1 대응되는 엔티티를 정의합니다.
//!
//! ## MongoDB 매핑
//!
//! - **ObjectId**: `_id` 필드는 저장소가 삽입 시 할당
//! - **복합 유니크 인덱스**: `{ provider: 1, provider_user_id: 1 }`
//! - **provider**: 소문자 문자열 (`"local"`, `"github"`, ...)
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{NewUser, User};
//!
//! let id = store.insert(new_user).await?;
//! let user: Option<User> = store.find_by_id(&id).await?;
//! ```

pub mod users;
