//! # Domain Layer
//!
//! - [`entities`] - MongoDB 문서 (`User`, `SellerProfile`)
//! - [`models`] - 신원 확인 값 객체와 요청 모델
//! - [`dto`] - HTTP 응답 형태

pub mod entities;
pub mod dto;
pub mod models;
