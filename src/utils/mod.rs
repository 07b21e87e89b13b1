//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 정리, 검증 메시지, HTML 이스케이프, 상수 시간 비교
//! - [`display_terminal`] - 서버 시작 시 터미널 출력

pub mod string_utils;
pub mod display_terminal;
