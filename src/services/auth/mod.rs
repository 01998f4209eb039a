//! 인증 프로바이더 어댑터와 신원 확인 서비스
//!
//! - [`AppTokenService`] - Provider A: 임베디드 앱 토큰 검증, 리소스 접근 확인
//! - [`WebSessionService`] - Provider B: 세션 쿠키 확인
//! - [`IdentityService`] - 두 어댑터와 사용자 리포지토리를 묶어 요청을 확인
//!
//! 세 서비스 모두 `#[service]` 싱글톤입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::IdentityService;
//!
//! let context = RequestContext::from_request(&req);
//! match IdentityService::instance().authenticate(&context).await? {
//!     Resolution::Authenticated(session) => log::info!("user={}", session.user_id()),
//!     Resolution::Unauthenticated => {}
//! }
//! ```

pub mod app_token_service;
pub mod web_session_service;
pub mod identity_service;

pub use app_token_service::AppTokenService;
pub use web_session_service::WebSessionService;
pub use identity_service::IdentityService;
