//! 식별자 해석 서비스
//!
//! `(provider, provider_user_id)` 쌍을 저장소의 사용자 레코드 하나로
//! 해석합니다. 없으면 만들고, 있으면 기존 레코드를 그대로 돌려줍니다.
//!
//! ## 해석 규칙
//!
//! 1. 정확히 일치하는 레코드가 있으면 변경 없이 반환 (먼저 쓴 값이 유지됨)
//! 2. 없으면 삽입 후, 할당된 id로 다시 읽은 레코드를 반환
//! 3. 삽입이 유니크 제약에 걸리면 (동시 요청이 먼저 만든 경우)
//!    조회를 한 번 더 시도해 그 레코드를 반환
//!
//! 세션 식별자를 사용자로 복원하는 [`deserialize`](IdentityService::deserialize)는
//! 조회만 하며 절대 레코드를 만들지 않습니다.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::{NewUser, User};
use crate::domain::models::oauth::NormalizedProfile;
use crate::errors::errors::AppError;
use crate::repositories::users::UserStore;
use crate::services::auth::session_codec::SessionIdentityCodec;

#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn UserStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// 사용 중인 저장소 이름 (헬스체크 표시용)
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// 찾기-또는-생성
    ///
    /// `candidate` 의 `access_token`, `avatar_url`, `user_name` 은
    /// 새로 만들 때만 사용됩니다. 기존 레코드는 갱신하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 `provider_user_id`
    /// * `DatabaseError` - 저장소 실패, 또는 경합 후 재조회에도 레코드가 없음
    pub async fn resolve(&self, candidate: NewUser) -> Result<User, AppError> {
        let provider = candidate.provider;
        let provider_user_id = candidate.provider_user_id.clone();

        if provider_user_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "사용자 식별자가 비어 있습니다".to_string(),
            ));
        }

        if let Some(existing) = self.store.find_by_provider(provider, &provider_user_id).await? {
            debug!("기존 사용자 로그인: {}:{}", provider, provider_user_id);
            return Ok(existing);
        }

        match self.store.insert(candidate).await {
            Ok(id) => {
                info!("새 사용자 등록: {}:{}", provider, provider_user_id);
                self.store.find_by_id(&id).await?.ok_or_else(|| {
                    AppError::DatabaseError(format!("생성 직후 사용자를 찾을 수 없습니다: {}", id))
                })
            }
            Err(AppError::ConflictError(_)) => {
                warn!("동시 생성 감지, 재조회: {}:{}", provider, provider_user_id);
                self.store
                    .find_by_provider(provider, &provider_user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::DatabaseError(format!(
                            "중복 삽입 후 사용자를 찾을 수 없습니다: {}:{}",
                            provider, provider_user_id
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }

    /// 정규화된 OAuth 프로필로 사용자를 해석합니다.
    pub async fn resolve_profile(
        &self,
        profile: NormalizedProfile,
        access_token: Option<String>,
    ) -> Result<User, AppError> {
        self.resolve(NewUser {
            provider: profile.provider,
            provider_user_id: profile.provider_user_id,
            access_token,
            avatar_url: profile.avatar_url,
            user_name: profile.user_name,
        })
        .await
    }

    /// 세션 식별자로 사용자를 복원합니다. 조회만 합니다.
    ///
    /// 형식이 잘못됐거나 사용자가 없으면 `NotFound` 를 반환합니다.
    pub async fn deserialize(&self, token: &str) -> Result<User, AppError> {
        let (provider, provider_user_id) = SessionIdentityCodec::decode(token)?;
        self.find(provider, &provider_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("세션의 사용자를 찾을 수 없습니다".to_string()))
    }

    pub async fn find(
        &self,
        provider: AuthProvider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError> {
        self.store.find_by_provider(provider, provider_user_id).await
    }
}
