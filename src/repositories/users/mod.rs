//! 사용자 저장소 모듈
//!
//! - [`UserStore`] - 리졸버가 의존하는 저장소 trait
//! - [`UserRepository`] - MongoDB + Redis 구현 (`#[repository]` 싱글톤)
//! - [`InMemoryUserStore`] - 테스트용 인메모리 구현
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_app_user_id("pA-1").await?;
//! ```

pub mod user_store;
pub mod user_repo;
pub mod memory_store;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_store::InMemoryUserStore;
