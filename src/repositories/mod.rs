//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스 계층은 구체 타입 대신 `Arc<dyn UserStore>` 를 주입받습니다.
//! 어떤 구현체를 쓸지는 `main` 에서 `USER_STORE` 설정으로 결정합니다.

pub mod users;
