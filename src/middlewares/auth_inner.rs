//! LoginRequired 접근 제어 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::CurrentUser;
use crate::errors::errors::AppError;
use crate::middlewares::session::Session;
use crate::services::users::IdentityService;

/// 실제 접근 제어를 수행하는 서비스
pub struct LoginRequiredService<S> {
    pub service: Rc<S>,
    pub login_path: &'static str,
}

impl<S, B> Service<ServiceRequest> for LoginRequiredService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let login_path = self.login_path;

        Box::pin(async move {
            let session = req.extensions().get::<Session>().cloned().ok_or_else(|| {
                AppError::InternalError("세션 미들웨어가 설정되지 않았습니다".to_string())
            })?;

            let identity_service = req
                .app_data::<web::Data<IdentityService>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalError("IdentityService 가 등록되지 않았습니다".to_string())
                })?;

            let Some(token) = session.identity() else {
                log::debug!("비로그인 접근: {} → {}", req.path(), login_path);
                return Ok(redirect(req, login_path));
            };

            match identity_service.deserialize(&token).await {
                Ok(user) => {
                    log::debug!("세션 사용자 확인: {}", token);
                    req.extensions_mut().insert(CurrentUser(user));
                }
                // 삭제되었거나 형식이 잘못된 식별자는 세션에서 제거
                Err(AppError::NotFound(_)) => {
                    log::info!("유효하지 않은 세션 식별자 제거: {}", token);
                    session.clear_identity();
                    session.flash("세션이 만료되었습니다. 다시 로그인해주세요");
                    return Ok(redirect(req, login_path));
                }
                Err(err) => {
                    log::error!("세션 사용자 조회 실패: {}", err);
                    return Err(err.into());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn redirect<B>(req: ServiceRequest, location: &'static str) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}
