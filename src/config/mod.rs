//! # Configuration Module
//!
//! 로그인 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 단위 구조체(unit struct)의 연관 함수로
//! 중앙집중식으로 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 저장소, 서버, 환경, 패스워드 해싱, 요청 제한 설정
//! - [`auth_config`] - 인증 프로바이더, OAuth 클라이언트, 세션 쿠키 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="3000"
//!
//! # 저장소 (mongodb | memory)
//! export USER_STORE="mongodb"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="oauth_login"
//!
//! # 세션
//! export SESSION_SECRET="your-session-secret"
//!
//! # 환경 (development, test, staging, production)
//! export ENVIRONMENT="development"
//! export BCRYPT_COST="10"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
