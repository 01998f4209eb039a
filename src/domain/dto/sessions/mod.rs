//! 세션 확인(`GET /api/v1/auth/session`)과 접근 권한(`GET /api/v1/access/{resource_id}`) 응답

pub mod session_response;
pub mod access_response;

pub use session_response::SessionResponse;
pub use access_response::AccessResponse;
