//! # Domain Models Module
//!
//! 저장되지 않는 도메인 값 객체입니다. 영속 엔티티는 [`crate::domain::entities`]에 있습니다.
//!
//! ```text
//! models/
//! ├── identity/   ← 신원 확인: 자격 증명, 변경분, 연결 전략, 결과
//! ├── auth/       ← 요청 컨텍스트, 인증된 사용자 추출자
//! └── access/     ← Provider A 리소스 접근 권한
//! ```

pub mod identity;
pub mod auth;
pub mod access;
