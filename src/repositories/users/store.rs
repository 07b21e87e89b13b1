//! 사용자 저장소 인터페이스
//!
//! 식별자 해석기와 로컬 계정 서비스는 이 trait 에만 의존합니다.
//! 구현체는 MongoDB([`UserRepository`](super::UserRepository))와
//! 프로세스 메모리([`MemoryUserStore`](super::MemoryUserStore)) 두 가지입니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::errors::AppError;

/// 사용자 레코드 저장소
///
/// # 불변식
///
/// `(provider, provider_user_id)` 쌍은 저장소 전체에서 유일해야 합니다.
/// 이미 존재하는 쌍으로 [`insert`](UserStore::insert)를 호출하면
/// 반드시 `AppError::ConflictError`를 반환해야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 저장소 이름 (로그 출력용)
    fn name(&self) -> &str;

    /// `(provider, provider_user_id)` 정확 일치 조회
    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError>;

    /// 저장소가 할당한 id로 조회
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    /// 새 사용자를 삽입하고 할당된 id를 반환합니다.
    async fn insert(&self, user: NewUser) -> Result<ObjectId, AppError>;

    /// 유니크 제약을 보장하는 인덱스를 준비합니다.
    async fn ensure_indexes(&self) -> Result<(), AppError>;
}

/// 유니크 제약 위반 에러 메시지
pub(crate) fn duplicate_identity(provider: AuthProvider, provider_user_id: &str) -> AppError {
    AppError::ConflictError(format!(
        "이미 등록된 사용자입니다: {}:{}",
        provider, provider_user_id
    ))
}
