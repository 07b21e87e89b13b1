//! # 사용자 리포지토리 구현
//!
//! MongoDB `user` 컬렉션을 저장소로 사용하는 [`UserStore`] 구현체입니다.
//!
//! ## 특징
//!
//! - **데이터 무결성**: `(provider, provider_user_id)` 복합 유니크 인덱스
//! - **중복 감지**: duplicate key(11000) 쓰기 에러를 `ConflictError`로 변환

use async_trait::async_trait;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::config::AuthProvider;
use crate::db::Database;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::errors::AppError;
use crate::repositories::users::store::{duplicate_identity, UserStore};

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 컬렉션
///
/// - **컬렉션명**: `user`
/// - **인덱스**: `provider_user_unique` = `{ provider: 1, provider_user_id: 1 }` (unique)
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ConflictError**: 유니크 인덱스 위반
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::repositories::users::{UserRepository, UserStore};
///
/// let repo = UserRepository::new(&database);
/// repo.ensure_indexes().await?;
///
/// let found = repo.find_by_provider(AuthProvider::GitHub, "42").await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "user";
    pub const UNIQUE_INDEX: &'static str = "provider_user_unique";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(Self::COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_user_id: &str,
    ) -> Result<Option<User>, AppError> {
        let user = self
            .collection
            .find_one(doc! {
                "provider": provider.as_str(),
                "provider_user_id": provider_user_id,
            })
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let user = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(user)
    }

    /// 새 사용자 생성
    ///
    /// 중복 여부는 유니크 인덱스가 판정합니다. 사전 조회는 하지 않으므로
    /// 동시에 들어온 두 삽입 중 정확히 하나만 성공합니다.
    async fn insert(&self, user: NewUser) -> Result<ObjectId, AppError> {
        let provider = user.provider;
        let provider_user_id = user.provider_user_id.clone();
        let document = user.into_user(ObjectId::new());

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    duplicate_identity(provider, &provider_user_id)
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 id가 ObjectId가 아닙니다".to_string()))?;

        debug!("사용자 생성: {}:{} ({})", provider, provider_user_id, id);
        Ok(id)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. **프로바이더 식별자 유니크 인덱스**
    ///    - 필드: `provider`, `provider_user_id` (오름차순)
    ///    - 목적: 찾기-또는-생성의 경쟁 상황에서도 레코드가 하나만 남도록 보장
    ///
    /// 2. **생성일 인덱스** (`created_at` 내림차순)
    ///
    /// 이미 중복 데이터가 있는 컬렉션에서는 유니크 인덱스 생성이 실패합니다.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        self.collection.create_indexes(index_models()).await?;

        info!("✅ 사용자 컬렉션 인덱스 준비 완료 ({})", Self::UNIQUE_INDEX);
        Ok(())
    }
}

fn index_models() -> [IndexModel; 2] {
    let identity_index = IndexModel::builder()
        .keys(doc! { "provider": 1, "provider_user_id": 1 })
        .options(IndexOptions::builder()
            .unique(true)
            .name(UserRepository::UNIQUE_INDEX.to_string())
            .build())
        .build();

    let created_at_index = IndexModel::builder()
        .keys(doc! { "created_at": -1 })
        .options(IndexOptions::builder()
            .name("created_at_desc".to_string())
            .build())
        .build();

    [identity_index, created_at_index]
}

/// duplicate key 쓰기 에러인지 확인
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{from_document, Document};
    use mongodb::error::{CommandError, Error, WriteError};

    fn write_error(code: i32) -> Error {
        let write_error: WriteError = from_document(doc! {
            "code": code,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: test.user",
        })
        .unwrap();

        Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    fn command_error(code: i32) -> Error {
        let command_error: CommandError = from_document(doc! {
            "code": code,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error",
        })
        .unwrap();

        Error::from(ErrorKind::Command(command_error))
    }

    #[test]
    fn test_duplicate_key_write_error_is_detected() {
        assert!(is_duplicate_key(&write_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&write_error(121)));
    }

    #[test]
    fn test_duplicate_key_command_error_is_detected() {
        assert!(is_duplicate_key(&command_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&command_error(50)));
    }

    #[test]
    fn test_other_error_kinds_are_not_duplicates() {
        let error = Error::from(std::io::Error::other("connection reset"));

        assert!(!is_duplicate_key(&error));
    }

    #[test]
    fn test_identity_index_is_unique_on_provider_pair() {
        let [identity, created_at] = index_models();

        let expected: Document = doc! { "provider": 1, "provider_user_id": 1 };
        assert_eq!(identity.keys, expected);

        let options = identity.options.unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.name.as_deref(), Some(UserRepository::UNIQUE_INDEX));

        assert_ne!(created_at.options.unwrap().unique, Some(true));
    }
}
