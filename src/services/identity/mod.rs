//! 신원 확인 및 계정 연결
//!
//! - [`provider`] - 프로바이더 어댑터 trait
//! - [`strategy`] - 전략별 조회/갱신 규칙
//! - [`resolver`] - 자격 증명 → 정규 사용자
//! - [`authenticator`] - 요청 → 자격 증명 → 리졸버
//!
//! 이 모듈의 타입은 전역 상태를 쓰지 않습니다. 저장소와 어댑터는 생성자로 주입하며,
//! 운영 환경의 조립은 [`IdentityService`](crate::services::auth::IdentityService)가 맡습니다.

pub mod provider;
pub mod strategy;
pub mod resolver;
pub mod authenticator;

pub use provider::{AppIdentityProvider, WebIdentityProvider};
pub use resolver::IdentityResolver;
pub use authenticator::DualAuthenticator;
