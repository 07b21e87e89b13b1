//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 OAuth 인증 사용자를 하나의 레코드 형태로 표현합니다.

use std::fmt;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// `(provider, provider_user_id)` 쌍은 저장소 전체에서 유일합니다.
/// `id`는 저장소가 생성 시 한 번 할당하며 이후 변경되지 않습니다.
///
/// `access_token`은 OAuth 사용자의 경우 프로바이더 액세스 토큰,
/// 로컬 사용자의 경우 bcrypt 해시이며 외부로 노출되지 않습니다.
/// (`Debug` 출력에서도 가려집니다)
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 레코드를 만든 인증 방식
    pub provider: AuthProvider,
    /// 프로바이더가 발급한 사용자 식별자 (로컬은 사용자가 정한 아이디)
    pub provider_user_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: DateTime,
}

impl User {
    /// 화면 표시용 이름 (없으면 provider_user_id)
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.provider_user_id)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("provider", &self.provider)
            .field("provider_user_id", &self.provider_user_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("avatar_url", &self.avatar_url)
            .field("user_name", &self.user_name)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// 저장소에 삽입할 신규 사용자
///
/// `id`와 `created_at`은 저장소가 채웁니다.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub provider: AuthProvider,
    pub provider_user_id: String,
    pub access_token: Option<String>,
    pub avatar_url: Option<String>,
    pub user_name: Option<String>,
}

impl NewUser {
    /// 로컬 사용자 (access_token 자리에 bcrypt 해시)
    pub fn local(login_id: String, password_hash: String, user_name: Option<String>) -> Self {
        Self {
            provider: AuthProvider::Local,
            provider_user_id: login_id,
            access_token: Some(password_hash),
            avatar_url: None,
            user_name,
        }
    }

    /// 할당된 id로 엔티티를 만듭니다.
    pub fn into_user(self, id: ObjectId) -> User {
        User {
            id: Some(id),
            provider: self.provider,
            provider_user_id: self.provider_user_id,
            access_token: self.access_token,
            avatar_url: self.avatar_url,
            user_name: self.user_name,
            created_at: DateTime::now(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("provider", &self.provider)
            .field("provider_user_id", &self.provider_user_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("avatar_url", &self.avatar_url)
            .field("user_name", &self.user_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_access_token() {
        let user = NewUser::local("alice".to_string(), "$2b$04$hash".to_string(), None)
            .into_user(ObjectId::new());

        let debug = format!("{:?}", user);
        assert!(!debug.contains("$2b$04$hash"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn test_display_name_falls_back_to_provider_user_id() {
        let mut user = NewUser::local("alice".to_string(), "hash".to_string(), None)
            .into_user(ObjectId::new());
        assert_eq!(user.display_name(), "alice");

        user.user_name = Some("Alice".to_string());
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn test_provider_is_stored_lowercase() {
        let user = NewUser {
            provider: AuthProvider::GitHub,
            provider_user_id: "42".to_string(),
            access_token: Some("t1".to_string()),
            avatar_url: None,
            user_name: None,
        }
        .into_user(ObjectId::new());

        let doc = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(doc.get_str("provider").unwrap(), "github");
        assert_eq!(doc.get_str("provider_user_id").unwrap(), "42");
    }
}
