//! 에러 타입 모듈
//!
//! HTTP 계층의 [`AppError`](errors::AppError)와 신원 확인 과정에서 사용하는
//! [`ProviderError`](errors::ProviderError), [`RepositoryError`](errors::RepositoryError)를 제공합니다.

pub mod errors;
