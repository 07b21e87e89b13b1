//! 메모리 기반 사용자 저장소
//!
//! 개발/데모(`USER_STORE=memory`)와 테스트에서 사용합니다.
//! 프로세스가 재시작되면 모든 사용자가 사라집니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::errors::AppError;
use crate::repositories::users::store::{duplicate_identity, UserStore};

/// `RwLock` 으로 보호되는 인메모리 저장소
///
/// 중복 확인과 삽입은 하나의 쓰기 잠금 안에서 수행됩니다.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("사용자 저장소 잠금이 손상되었습니다".to_string())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(poisoned)?;

        Ok(users
            .values()
            .find(|u| u.provider == provider && u.provider_user_id == provider_user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<ObjectId, AppError> {
        let mut users = self.users.write().map_err(poisoned)?;

        let exists = users.values().any(|u| {
            u.provider == user.provider && u.provider_user_id == user.provider_user_id
        });
        if exists {
            return Err(duplicate_identity(user.provider, &user.provider_user_id));
        }

        let id = ObjectId::new();
        users.insert(id, user.into_user(id));
        Ok(id)
    }

    async fn ensure_indexes(&self) -> Result<(), AppError> {
        Ok(())
    }
}
