//! 비즈니스 로직 계층
//!
//! - [`identity`] - 신원 확인과 계정 연결 (전역 상태 없음, 생성자 주입)
//! - [`auth`] - 프로바이더 어댑터와 이를 조립하는 `#[service]` 싱글톤
//! - [`users`] - 인증된 사용자 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::IdentityService, users::UserService};
//!
//! let identity = IdentityService::instance();
//! let users = UserService::instance();
//! ```

pub mod identity;
pub mod auth;
pub mod users;
