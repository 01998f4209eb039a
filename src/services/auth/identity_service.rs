//! # 신원 확인 서비스
//!
//! 싱글톤 레지스트리의 구성요소(사용자 리포지토리, 두 프로바이더 어댑터)로
//! [`DualAuthenticator`]를 조립해 요청을 확인합니다.
//!
//! 저장소 실패는 [`AppError::ResolutionFailed`]로 바뀝니다. 클라이언트에는 재시도 안내만 나가고
//! 상세 원인은 인증기가 남긴 로그에서 확인합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::Resolution;
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::users::{UserRepository, UserStore};
use crate::services::identity::{DualAuthenticator, IdentityResolver};
use super::app_token_service::AppTokenService;
use super::web_session_service::WebSessionService;

#[service(name = "identity")]
pub struct IdentityService {
    user_repo: Arc<UserRepository>,
    app_tokens: Arc<AppTokenService>,
    web_sessions: Arc<WebSessionService>,
}

impl IdentityService {
    fn authenticator(&self) -> DualAuthenticator {
        let store: Arc<dyn UserStore> = self.user_repo.clone();
        DualAuthenticator::new(
            IdentityResolver::new(store),
            self.app_tokens.clone(),
            self.web_sessions.clone(),
        )
    }

    /// 요청을 정규 사용자로 확인합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution::Authenticated(_))` - 확인된 세션
    /// * `Ok(Resolution::Unauthenticated)` - 두 프로바이더 모두 자격 증명 없음
    ///
    /// # Errors
    ///
    /// * `AppError::ResolutionFailed` - 사용자 저장소 읽기/쓰기 실패
    pub async fn authenticate(&self, context: &RequestContext) -> AppResult<Resolution> {
        self.authenticator()
            .authenticate(context)
            .await
            .map_err(|e| AppError::ResolutionFailed(e.to_string()))
    }
}
