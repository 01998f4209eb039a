//! 데이터 액세스 계층
//!
//! `#[repository]` 매크로로 싱글톤 관리되는 리포지토리를 제공합니다.
//! MongoDB를 주 저장소로, Redis를 조회 캐시로 사용합니다.

pub mod users;
