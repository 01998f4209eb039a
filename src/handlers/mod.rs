//! # HTTP Request Handlers Module
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 신원 확인, 사용자 조회                ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB + Redis                ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - **`auth`**: 세션 확인 (`GET /auth/session`), 로그아웃 (`POST /auth/logout`)
//! - **`users`**: 현재 사용자 (`GET /me`), 리소스 접근 권한 (`GET /access/{resource_id}`)

pub mod users;
pub mod auth;
