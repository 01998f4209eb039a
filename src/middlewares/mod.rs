//! 미들웨어 모듈
//!
//! ### DualAuthMiddleware
//! - 두 프로바이더로 요청의 신원을 확인
//! - 확인된 사용자를 request extension에 저장 (`AuthenticatedUser`, `ResolvedSession`)
//! - 필수/선택 인증 모드 지원
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/me")
//!             .wrap(DualAuthMiddleware::required())
//!             .service(handlers::users::get_me)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::{AuthMode, DualAuthMiddleware};
pub(crate) use auth_inner::unauthenticated_response;
