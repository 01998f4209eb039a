//! 인증 프로바이더 어댑터 인터페이스
//!
//! 두 어댑터 모두 세 가지 결과를 구분합니다.
//!
//! - `Ok(Some(credential))`: 검증된 신원
//! - `Ok(None)`: 토큰/세션이 아예 없음
//! - `Err(ProviderError)`: 있었지만 검증하지 못함
//!
//! 인증기는 뒤의 두 경우를 똑같이 "자격 증명 없음"으로 처리하되 로그 레벨을 달리합니다.

use async_trait::async_trait;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::ProviderCredential;
use crate::errors::errors::ProviderError;

/// Provider A (임베디드 앱 토큰, 요청 헤더 기반)
#[async_trait]
pub trait AppIdentityProvider: Send + Sync {
    async fn verify(&self, context: &RequestContext) -> Result<Option<ProviderCredential>, ProviderError>;
}

/// Provider B (웹 세션 쿠키 기반)
#[async_trait]
pub trait WebIdentityProvider: Send + Sync {
    async fn current_session(&self, context: &RequestContext) -> Result<Option<ProviderCredential>, ProviderError>;
}
