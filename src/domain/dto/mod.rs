//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 데이터 구조를 정의합니다.
//! 폼 입력은 `validator`로 검증하고, 응답 DTO는 민감한 필드를 담지 않습니다.

pub mod users;

pub use users::*;
