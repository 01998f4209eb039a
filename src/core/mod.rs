//! # Core Framework Module
//!
//! 호스트 계층의 컴포넌트 조립을 담당합니다.
//!
//! - [`registry`] - `ServiceLocator`, `#[service]` / `#[repository]` 등록 정보
//!
//! 에러 타입은 [`crate::errors`]에 있으며 편의를 위해 여기서도 재export합니다.

pub mod registry;

pub use registry::*;
pub use crate::errors::errors::{AppError, AppResult};
