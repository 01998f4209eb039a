//! 신원 확인(Identity Resolution) 모델
//!
//! - [`credential::ProviderCredential`] - 어댑터가 돌려주는 검증된 신원
//! - [`user_patch::UserPatch`] - 기존 사용자에 반영할 변경분
//! - [`link_strategy::LinkStrategy`] - 프로바이더별 조회/연결/생성 파이프라인
//! - [`session::Resolution`] - 리졸버 결과 (`Authenticated` / `Unauthenticated`)

pub mod credential;
pub mod user_patch;
pub mod link_strategy;
pub mod session;

pub use credential::ProviderCredential;
pub use user_patch::UserPatch;
pub use link_strategy::LinkStrategy;
pub use session::{Resolution, ResolvedSession};
