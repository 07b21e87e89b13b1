//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main` 에서 생성자로 조립되어 `web::Data` 로 주입됩니다.
//! 저장소는 `Arc<dyn UserStore>` 로 받으므로 테스트에서는 메모리 저장소를 씁니다.
//!
//! # Features
//!
//! - 식별자 해석: `(provider, provider_user_id)` 찾기-또는-생성
//! - 로컬 계정 등록과 자격 증명 검증 (bcrypt)
//! - 세션 식별자 인코딩/디코딩
//! - OAuth 2.0 Authorization Code Flow (5개 프로바이더)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::{IdentityService, UserService};
//!
//! let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
//! let identities = IdentityService::new(store.clone());
//! let users = UserService::new(store, PasswordConfig::bcrypt_cost());
//! ```

pub mod users;
pub mod auth;
