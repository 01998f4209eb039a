//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 응답 본문 형태를 정의합니다. 엔티티(`User`, `SellerProfile`)를 그대로 내보내지 않고
//! ID는 16진수 문자열로, 시각은 RFC 3339 문자열로 바꿔서 내보냅니다.
//!
//! ```text
//! dto/
//! ├── users/      ← 사용자, 기본 프로필
//! └── sessions/   ← 세션 확인 결과, 접근 권한
//! ```

pub mod users;
pub mod sessions;

pub use users::*;
pub use sessions::*;
