//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserStore`] trait 과 두 구현체를 제공합니다.
//!
//! - [`UserRepository`] - MongoDB `user` 컬렉션
//! - [`MemoryUserStore`] - 프로세스 메모리
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{MemoryUserStore, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
//! let user = store.find_by_provider(AuthProvider::Local, "alice").await?;
//! ```

pub mod store;
pub mod user_repo;
pub mod memory_repo;

pub use store::UserStore;
pub use user_repo::UserRepository;
pub use memory_repo::MemoryUserStore;
