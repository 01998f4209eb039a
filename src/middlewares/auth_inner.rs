//! DualAuthMiddleware 인증 로직
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::{AuthenticatedUser, RequestContext};
use crate::domain::models::identity::Resolution;
use crate::middlewares::auth_middleware::AuthMode;
use crate::services::auth::IdentityService;

pub struct DualAuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for DualAuthMiddlewareService<S>
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
        let mode = self.mode;

        Box::pin(async move {
            let context = RequestContext::from_request(req.request());
            let identity = IdentityService::instance();

            match (mode, identity.authenticate(&context).await) {
                (_, Ok(Resolution::Authenticated(session))) => {
                    let user = AuthenticatedUser::from_session(&session);
                    log::debug!("인증 성공: 사용자 ID {} ({})", user.user_id, user.auth_provider.as_str());
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(session);
                }
                (AuthMode::Required, Ok(Resolution::Unauthenticated)) => {
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, unauthenticated_response())
                        .map_into_right_body();
                    return Ok(res);
                }
                (AuthMode::Optional, Ok(Resolution::Unauthenticated)) => {
                    log::debug!("선택적 인증: 자격 증명 없음, 요청 진행");
                }
                (_, Err(err)) => {
                    // 저장소 실패는 미인증으로 낮추지 않습니다
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, err.error_response())
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

pub(crate) fn unauthenticated_response() -> HttpResponse {
    HttpResponse::Unauthorized()
        .json(serde_json::json!({
            "error": "authentication_required",
            "message": "로그인이 필요합니다"
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unauthenticated_response_is_401() {
        assert_eq!(unauthenticated_response().status(), StatusCode::UNAUTHORIZED);
    }
}
