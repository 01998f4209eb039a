//! # 이중 인증기
//!
//! 요청 하나에 대해 두 프로바이더를 순서대로 물어보고 리졸버에 넘깁니다.
//!
//! 1. 로그아웃 쿠키가 `true`이면 Provider A를 건너뜁니다. Provider B에는 영향이 없습니다.
//! 2. Provider A 어댑터 호출
//! 3. A가 자격 증명을 주지 못했을 때만 Provider B 어댑터 호출
//! 4. [`IdentityResolver::resolve`]
//!
//! 어댑터 실패는 "자격 증명 없음"으로 처리하고 경고 로그만 남깁니다.
//! 요청마다 UUID를 붙여 한 번의 확인 과정을 로그에서 추적할 수 있게 합니다.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use crate::config::AuthProvider;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::{ProviderCredential, Resolution};
use crate::errors::errors::{ProviderError, RepositoryError};
use super::provider::{AppIdentityProvider, WebIdentityProvider};
use super::resolver::IdentityResolver;

pub struct DualAuthenticator {
    resolver: IdentityResolver,
    app: Arc<dyn AppIdentityProvider>,
    web: Arc<dyn WebIdentityProvider>,
}

impl DualAuthenticator {
    pub fn new(
        resolver: IdentityResolver,
        app: Arc<dyn AppIdentityProvider>,
        web: Arc<dyn WebIdentityProvider>,
    ) -> Self {
        Self { resolver, app, web }
    }

    pub async fn authenticate(&self, context: &RequestContext) -> Result<Resolution, RepositoryError> {
        let request_id = Uuid::new_v4();

        let app = if context.is_logged_out() {
            log::debug!("[{}] 로그아웃 상태, App 인증을 건너뜁니다", request_id);
            None
        } else {
            accept(AuthProvider::App, self.app.verify(context).await, request_id)
        };

        let web = if app.is_some() {
            None
        } else {
            accept(AuthProvider::Web, self.web.current_session(context).await, request_id)
        };

        match self.resolver.resolve(app, web).await {
            Ok(Resolution::Authenticated(session)) => {
                log::info!(
                    "[{}] 인증 완료: provider={} strategy={} user={}",
                    request_id,
                    session.provider.as_str(),
                    session.strategy,
                    session.user_id()
                );
                Ok(Resolution::Authenticated(session))
            }
            Ok(Resolution::Unauthenticated) => {
                log::debug!("[{}] 인증 정보 없음", request_id);
                Ok(Resolution::Unauthenticated)
            }
            Err(e) => {
                log::error!("[{}] 사용자 확인 실패: {}", request_id, e);
                Err(e)
            }
        }
    }
}

/// 어댑터 결과를 리졸버 입력으로 바꿉니다. 실패와 부재는 모두 `None`입니다.
fn accept(
    provider: AuthProvider,
    result: Result<Option<ProviderCredential>, ProviderError>,
    request_id: Uuid,
) -> Option<ProviderCredential> {
    match result {
        Ok(Some(credential)) => match credential.validate() {
            Ok(()) => Some(credential),
            Err(e) => {
                log::warn!("[{}] {} 자격 증명 형식 오류: {}", request_id, provider.as_str(), e);
                None
            }
        },
        Ok(None) => {
            log::debug!("[{}] {} 자격 증명 없음", request_id, provider.as_str());
            None
        }
        Err(e) => {
            log::warn!("[{}] {} 인증 실패: {}", request_id, provider.as_str(), e);
            None
        }
    }
}
