//! 이중 인증 미들웨어
//!
//! 요청마다 [`IdentityService`](crate::services::auth::IdentityService)로 신원을 확인하고
//! 결과를 request extensions에 넣습니다.
//!
//! | 결과 | Required | Optional |
//! |------|----------|----------|
//! | 인증됨 | 통과 (`AuthenticatedUser`, `ResolvedSession` 저장) | 통과 (저장) |
//! | 미인증 | 401 `authentication_required` | 통과 |
//! | 저장소 실패 | 500 | 500 |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::DualAuthMiddlewareService;

/// 미인증 요청 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 인증 필수 - 미인증이면 401
    Required,
    /// 인증 선택 - 미인증이어도 핸들러까지 진행
    Optional,
}

pub struct DualAuthMiddleware {
    mode: AuthMode,
}

impl DualAuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }
}

impl<S, B> Transform<S, ServiceRequest> for DualAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = DualAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DualAuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_mode() {
        assert_eq!(DualAuthMiddleware::required().mode(), AuthMode::Required);
        assert_eq!(DualAuthMiddleware::optional().mode(), AuthMode::Optional);
    }
}
