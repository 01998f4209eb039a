//! 이중 인증 서비스 백엔드
//!
//! 두 개의 독립된 인증 프로바이더를 하나의 정규 사용자 레코드로 묶는 서비스입니다.
//!
//! - **App (Provider A)**: 임베디드 앱이 헤더로 전달하는 사용자 토큰. 이메일이 자주 비어 있습니다.
//! - **Web (Provider B)**: 쿠키 기반 웹 세션. 인증되면 이메일이 항상 있습니다.
//!
//! 요청마다 App을 먼저 확인하고, 결과가 없을 때만 Web을 확인합니다. 확인된 자격 증명은
//! 정해진 순서의 전략으로 기존 사용자를 찾아 연결하거나, 새 사용자와 기본 판매자 프로필을 만듭니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ DualAuth (MW)   │ ← 요청 신원 확인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 프로바이더 어댑터, IdentityResolver
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore (MongoDB + Redis)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use dual_auth_backend::domain::models::auth::RequestContext;
//! use dual_auth_backend::domain::models::identity::Resolution;
//! use dual_auth_backend::services::auth::IdentityService;
//!
//! let context = RequestContext::from_request(&req);
//! if let Resolution::Authenticated(session) = IdentityService::instance().authenticate(&context).await? {
//!     log::info!("{} via {:?}", session.user_id(), session.strategy);
//! }
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
