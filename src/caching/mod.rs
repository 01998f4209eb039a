//! 캐싱 계층 모듈
//!
//! 사용자 조회(내부 ID, 프로바이더 ID)를 위한 Redis read-through 캐시입니다.
//!
//! # 키 규칙
//!
//! | 조회 | 키 | TTL |
//! |------|----|-----|
//! | 내부 ID | `user_repository:{id}` | 10분 |
//! | App 사용자 ID | `user_repository:app:{app_user_id}` | 10분 |
//! | Web 사용자 ID | `user_repository:web:{web_user_id}` | 10분 |
//!
//! 사용자 문서가 갱신되면 세 키를 모두 삭제합니다. 미연결 조건이 붙는 이메일/사용자명 조회는 캐싱하지 않습니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
