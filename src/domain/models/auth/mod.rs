//! 인증 관련 모델
//!
//! - [`authenticated_user`] - 미들웨어가 요청에 붙이는 사용자 정보와 추출자
//! - [`request_context`] - 프로바이더 어댑터에 넘기는 헤더/쿠키 스냅샷

pub mod authenticated_user;
pub mod request_context;

pub use authenticated_user::{AuthenticatedUser, OptionalUser};
pub use request_context::RequestContext;
