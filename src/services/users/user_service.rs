//! 로컬 계정 서비스
//!
//! 아이디/비밀번호 기반 계정의 등록과 자격 증명 검증을 담당합니다.
//! 로컬 사용자는 `provider = local`, `provider_user_id = 아이디`,
//! `access_token = bcrypt 해시` 로 저장됩니다.

use std::sync::Arc;

use bcrypt::hash;
use once_cell::sync::OnceCell;
use validator::Validate;

use crate::config::AuthProvider;
use crate::domain::dto::users::request::RegisterRequest;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::errors::{AppError, ErrorContext};
use crate::repositories::users::UserStore;
use crate::utils::string_utils::first_validation_message;

/// 아이디 존재 여부와 비밀번호 불일치를 구분하지 않는 공통 실패 메시지
pub const INVALID_CREDENTIALS: &str = "아이디 혹은 비밀번호가 일치하지 않습니다";

/// 없는 아이디 검증에 쓰는 더미 해시의 원문
const DUMMY_PASSWORD: &str = "oauth-login-service-dummy-password";

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl UserService {
    /// `bcrypt_cost` 는 보통 [`PasswordConfig::bcrypt_cost`](crate::config::PasswordConfig::bcrypt_cost) 값입니다.
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// 로컬 계정을 등록합니다.
    ///
    /// 비밀번호는 호출마다 새 salt 로 해싱되며 평문은 저장되지 않습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 입력 형식 오류
    /// * `ConflictError` - 이미 사용 중인 아이디
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

        if self
            .store
            .find_by_provider(AuthProvider::Local, &request.login_id)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError("이미 사용 중인 아이디입니다".to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let new_user = NewUser::local(request.login_id.clone(), password_hash, request.user_name);

        let id = self.store.insert(new_user).await.map_err(|e| match e {
            AppError::ConflictError(_) => {
                AppError::ConflictError("이미 사용 중인 아이디입니다".to_string())
            }
            other => other,
        })?;

        log::info!("로컬 계정 등록: {}", request.login_id);

        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::DatabaseError(format!("생성 직후 사용자를 찾을 수 없습니다: {}", id)))
    }

    /// 로컬 자격 증명을 검증합니다.
    ///
    /// 없는 아이디와 틀린 비밀번호는 같은 `AuthenticationError` 로 응답합니다.
    /// 없는 아이디도 같은 비용의 더미 해시로 bcrypt 검증을 거치므로
    /// 응답 시간으로 둘을 구분할 수 없습니다.
    /// 저장된 해시를 해석할 수 없는 경우도 같은 실패로 처리합니다.
    pub async fn verify_local(&self, login_id: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::AuthenticationError(INVALID_CREDENTIALS.to_string());

        let user = self
            .store
            .find_by_provider(AuthProvider::Local, login_id)
            .await?
            .filter(|user| user.access_token.is_some());

        let Some(user) = user else {
            self.verify_dummy(password);
            return Err(invalid());
        };

        let password_hash = user.access_token.as_deref().ok_or_else(invalid)?;

        let is_valid = bcrypt::verify(password, password_hash).unwrap_or_else(|e| {
            log::warn!("저장된 비밀번호 해시를 해석할 수 없습니다 (local:{}): {}", login_id, e);
            false
        });

        if !is_valid {
            return Err(invalid());
        }

        Ok(user)
    }

    fn verify_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| hash(DUMMY_PASSWORD, self.bcrypt_cost));

        match dummy {
            Ok(dummy) => {
                let _ = bcrypt::verify(password, dummy);
            }
            Err(e) => log::warn!("더미 비밀번호 해시 생성 실패: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MemoryUserStore;

    const TEST_COST: u32 = 4;

    fn service() -> (UserService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        (UserService::new(store.clone(), TEST_COST), store)
    }

    fn register_request(login_id: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
            user_name: None,
            csrf_token: String::new(),
        }
    }

    #[actix_web::test]
    async fn test_register_then_verify() {
        let (service, _) = service();

        let user = service.register(register_request("alice", "pw1234")).await.unwrap();
        assert_eq!(user.provider, AuthProvider::Local);
        assert_eq!(user.provider_user_id, "alice");

        let verified = service.verify_local("alice", "pw1234").await.unwrap();
        assert_eq!(verified.id, user.id);
    }

    #[actix_web::test]
    async fn test_stored_hash_is_not_plaintext() {
        let (service, _) = service();
        let user = service.register(register_request("alice", "pw1234")).await.unwrap();

        let stored = user.access_token.unwrap();
        assert_ne!(stored, "pw1234");
        assert!(bcrypt::verify("pw1234", &stored).unwrap());
    }

    #[actix_web::test]
    async fn test_same_password_gets_fresh_salt() {
        let (service, _) = service();
        let a = service.register(register_request("alice", "pw1234")).await.unwrap();
        let b = service.register(register_request("bob", "pw1234")).await.unwrap();

        assert_ne!(a.access_token, b.access_token);
    }

    #[actix_web::test]
    async fn test_wrong_password_and_unknown_id_fail_identically() {
        let (service, _) = service();
        service.register(register_request("alice", "pw1234")).await.unwrap();

        let wrong_password = service.verify_local("alice", "nope").await.unwrap_err();
        let unknown_id = service.verify_local("bob", "pw1234").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::AuthenticationError(_)));
        assert_eq!(wrong_password.to_string(), unknown_id.to_string());
    }

    #[actix_web::test]
    async fn test_unknown_id_still_runs_bcrypt_at_configured_cost() {
        let (service, _) = service();
        assert!(service.dummy_hash.get().is_none());

        let err = service.verify_local("ghost", "pw1234").await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        let dummy = service.dummy_hash.get().unwrap();
        assert!(dummy.starts_with("$2b$04$"));
        assert!(bcrypt::verify(DUMMY_PASSWORD, dummy).unwrap());
    }

    #[actix_web::test]
    async fn test_unparsable_hash_is_generic_failure() {
        let (service, store) = service();
        store
            .insert(NewUser::local("legacy".to_string(), "not-a-bcrypt-hash".to_string(), None))
            .await
            .unwrap();

        let err = service.verify_local("legacy", "anything").await.unwrap_err();
        assert_eq!(err.to_string(), AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()).to_string());
    }

    #[actix_web::test]
    async fn test_duplicate_registration_is_conflict() {
        let (service, store) = service();
        service.register(register_request("alice", "pw1234")).await.unwrap();

        let result = service.register(register_request("alice", "other-pw")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.len(), 1);

        // 기존 비밀번호는 그대로 유효
        assert!(service.verify_local("alice", "pw1234").await.is_ok());
    }

    #[actix_web::test]
    async fn test_invalid_input_is_validation_error() {
        let (service, store) = service();

        let result = service.register(register_request("alice", "abc")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_oauth_user_with_same_id_is_not_local() {
        let (service, store) = service();
        store
            .insert(NewUser {
                provider: AuthProvider::GitHub,
                provider_user_id: "alice".to_string(),
                access_token: Some("gho_token".to_string()),
                avatar_url: None,
                user_name: None,
            })
            .await
            .unwrap();

        assert!(service.verify_local("alice", "gho_token").await.is_err());
        assert!(service.register(register_request("alice", "pw1234")).await.is_ok());
    }
}
