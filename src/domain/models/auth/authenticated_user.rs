//! # 인증된 사용자 정보
//!
//! `DualAuthMiddleware`가 신원 확인에 성공하면 Request Extensions에 넣는 값입니다.
//! 핸들러는 추출자로 바로 받을 수 있습니다.
//!
//! ```rust,ignore
//! #[get("")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     log::info!("{} via {}", user.user_id, user.auth_provider.as_str());
//!     // ...
//! }
//!
//! #[get("/landing")]
//! async fn landing(user: OptionalUser) -> HttpResponse {
//!     match user.0 {
//!         Some(user) => HttpResponse::Ok().json(user),
//!         None => HttpResponse::Ok().finish(),
//!     }
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::models::identity::session::ResolvedSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 정규 사용자 ID (MongoDB ObjectId 16진수)
    pub user_id: String,

    /// 이번 요청을 인증한 프로바이더
    pub auth_provider: AuthProvider,

    pub provider_user_id: String,

    /// 접근 권한 확인(Provider A)에 필요한 App 사용자 ID. Web 전용 계정이면 없습니다.
    pub app_user_id: Option<String>,

    pub web_user_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn from_session(session: &ResolvedSession) -> Self {
        Self {
            user_id: session.user_id(),
            auth_provider: session.provider,
            provider_user_id: session.provider_user_id.clone(),
            app_user_id: session.user.app_user_id.clone(),
            web_user_id: session.user.web_user_id.clone(),
        }
    }

    pub fn is_linked(&self) -> bool {
        self.app_user_id.is_some() && self.web_user_id.is_some()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 인증이 선택적인 라우트용 추출자. 실패하지 않습니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use crate::domain::entities::users::user::User;
    use crate::domain::models::identity::{LinkStrategy, ProviderCredential};
    use mongodb::bson::oid::ObjectId;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "65f0c0ffee0000000000beef".to_string(),
            auth_provider: AuthProvider::Web,
            provider_user_id: "pB-9".to_string(),
            app_user_id: Some("pA-1".to_string()),
            web_user_id: Some("pB-9".to_string()),
        }
    }

    #[test]
    fn test_from_session_copies_provider_ids() {
        let mut user = User::from_credential(AuthProvider::App, &ProviderCredential::new("pA-1"));
        user.id = Some(ObjectId::new());
        let session = ResolvedSession::new(user.clone(), AuthProvider::App, "pA-1".to_string(), LinkStrategy::ByExternalId);

        let authenticated = AuthenticatedUser::from_session(&session);

        assert_eq!(authenticated.user_id, user.id_string().unwrap());
        assert_eq!(authenticated.app_user_id.as_deref(), Some("pA-1"));
        assert_eq!(authenticated.web_user_id, None);
        assert!(!authenticated.is_linked());
    }

    #[actix_web::test]
    async fn test_extractor_reads_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_user());

        let extracted = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(extracted, sample_user());
        assert!(extracted.is_linked());
    }

    #[actix_web::test]
    async fn test_extractor_rejects_anonymous_request() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&req).await.is_err());

        let optional = OptionalUser::extract(&req).await.unwrap();
        assert!(optional.0.is_none());
    }
}
