//! # User HTTP Handlers
//!
//! 로그인한 사용자의 홈 화면과 로컬 계정 등록을 처리합니다.
//!
//! | 메서드 | 경로 | 설명 | 결과 |
//! |--------|------|------|------|
//! | `GET` | `/` | 홈 화면 (로그인 필요) | 200 / 302 `/login` |
//! | `GET` | `/register` | 등록 폼 | 200 |
//! | `POST` | `/register` | 계정 생성 후 로그인 | 302 `/` / 302 `/register` |
use actix_web::{get, post, web, HttpResponse};

use crate::domain::models::auth::CurrentUser;
use crate::domain::{RegisterRequest, UserResponse};
use crate::errors::errors::AppError;
use crate::handlers::{html, redirect};
use crate::middlewares::{LoginRequired, Session};
use crate::services::auth::SessionIdentityCodec;
use crate::services::users::UserService;
use crate::views::{home_page, register_page};

const REGISTER_PATH: &str = "/register";

/// 홈 화면
///
/// [`LoginRequired`] 가 복원한 사용자의 이름, 아바타, 로그인 방식을 보여줍니다.
///
/// # Endpoint
/// `GET /`
#[get("/", wrap = "LoginRequired::new()")]
pub async fn home(user: CurrentUser, session: Session) -> Result<HttpResponse, AppError> {
    let flashes = session.take_flashes();
    let csrf_token = session.csrf_token();
    let view = UserResponse::from(user.into_inner());

    Ok(html(home_page(&view, &flashes, &csrf_token)))
}

/// 계정 등록 폼
///
/// # Endpoint
/// `GET /register`
#[get("/register")]
pub async fn register_form(session: Session) -> Result<HttpResponse, AppError> {
    let flashes = session.take_flashes();
    let csrf_token = session.csrf_token();

    Ok(html(register_page(&flashes, &csrf_token)))
}

/// 계정 등록 핸들러
///
/// 성공하면 바로 로그인 상태로 `/` 에 보냅니다.
/// 입력 오류나 중복 아이디는 플래시와 함께 등록 폼으로 돌려보냅니다.
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(
    session: Session,
    user_service: web::Data<UserService>,
    form: web::Form<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    let login_id = form.login_id.clone();
    match user_service.register(form.into_inner()).await {
        Ok(user) => {
            log::info!("로컬 계정 등록 후 로그인: {}", login_id);
            session.login(SessionIdentityCodec::encode(&user));
            Ok(redirect("/"))
        }
        Err(AppError::ValidationError(message)) | Err(AppError::ConflictError(message)) => {
            log::info!("로컬 계정 등록 거부: {} ({})", login_id, message);
            session.flash(message);
            Ok(redirect(REGISTER_PATH))
        }
        Err(e) => Err(e),
    }
}
