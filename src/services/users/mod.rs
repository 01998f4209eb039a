//! 사용자 조회 서비스
//!
//! 인증된 사용자의 정보와 기본 프로필, 리소스 접근 권한을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let me = UserService::instance().get_me(&user.user_id).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
