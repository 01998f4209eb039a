//! Users Entity Module
//!
//! - [`user::User`] - 정규 사용자 문서 (`users` 컬렉션)
//! - [`seller_profile::SellerProfile`] - 사용자 생성 시 함께 만들어지는 기본 프로필 (`seller_profiles` 컬렉션)

pub mod user;
pub mod seller_profile;

pub use user::User;
pub use seller_profile::SellerProfile;
