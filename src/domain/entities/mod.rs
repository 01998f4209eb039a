//! # Domain Entities Module
//!
//! MongoDB에 저장되는 영속 엔티티입니다.

pub mod users;
