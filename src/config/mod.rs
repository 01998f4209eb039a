//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 한곳에서 관리합니다.
//! `main.rs`가 `PROFILE`에 따라 `.env.dev` / `.env.prod`를 먼저 로드합니다.
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩
//! - [`auth_config`] - 두 인증 프로바이더, 로그아웃 쿠키
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AppPlatformConfig, Environment, ServerConfig};
//!
//! let env = Environment::current();
//! let header = AppPlatformConfig::token_header();
//! let bind = ServerConfig::bind_address();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
