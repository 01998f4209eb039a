//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 프로바이더 응답의 빈 값 정리, serde 역직렬화 헬퍼

pub mod string_utils;
