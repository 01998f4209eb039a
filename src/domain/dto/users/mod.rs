//! # User Data Transfer Objects Module
//!
//! `GET /api/v1/me`와 세션 응답에 들어가는 사용자/프로필 형태입니다.
//!
//! ```json
//! {
//!   "user": {
//!     "id": "65f0c0ffee0000000000beef",
//!     "app_user_id": "user_abc",
//!     "web_user_id": null,
//!     "email": null,
//!     "username": "creatorX",
//!     "display_name": "Creator X",
//!     "avatar_url": null,
//!     "is_linked": false,
//!     "created_at": "2024-01-01T00:00:00Z",
//!     "updated_at": "2024-01-15T10:30:00Z"
//!   },
//!   "profile": { "hourly_rate": 0.0, "is_active": true }
//! }
//! ```

pub mod response;

pub use response::*;
