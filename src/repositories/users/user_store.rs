//! # 사용자 저장소 인터페이스
//!
//! 리졸버가 의존하는 유일한 저장소 계약입니다. 운영에서는
//! [`UserRepository`](super::user_repo::UserRepository) (MongoDB + Redis),
//! 테스트에서는 [`InMemoryUserStore`](super::memory_store::InMemoryUserStore)가 구현합니다.
//!
//! ## 구현체가 지켜야 할 규칙
//!
//! - `app_user_id`, `web_user_id`는 값이 있을 때 문서 간에 유일해야 합니다. 위반하는 쓰기는
//!   [`RepositoryError::DuplicateIdentity`]로 실패합니다.
//! - `update`가 프로바이더 ID를 붙일 때, 대상 문서의 해당 필드가 이미 채워져 있으면
//!   덮어쓰지 않고 `DuplicateIdentity`로 실패합니다. 연결은 단조적입니다.
//! - 이메일, 사용자명 비교는 대소문자를 포함한 글자 그대로의 일치입니다.
//! - 기본 프로필은 사용자당 하나입니다. 이미 있으면 기존 것을 돌려줍니다.

use async_trait::async_trait;
use crate::domain::entities::users::{SellerProfile, User};
use crate::domain::models::identity::UserPatch;
use crate::errors::errors::RepositoryError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 내부 ID로 조회합니다. 형식이 잘못된 ID는 `Ok(None)`입니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_app_user_id(&self, app_user_id: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_web_user_id(&self, web_user_id: &str) -> Result<Option<User>, RepositoryError>;

    /// `email` 일치 + `app_user_id` 미연결
    async fn find_by_email_unlinked_app(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// `username` 일치 + `app_user_id` 미연결
    async fn find_by_username_unlinked_app(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// `email` 일치 + `web_user_id` 미연결 + `app_user_id` 연결됨
    async fn find_by_email_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// 위 조건에 `username` 존재까지 요구하는 2차 조회
    async fn find_by_email_and_username_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// 새 사용자를 저장하고 ID가 채워진 문서를 돌려줍니다.
    async fn create(&self, user: User) -> Result<User, RepositoryError>;

    /// 변경분을 반영한 최신 문서를 돌려줍니다.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, RepositoryError>;

    async fn create_default_profile(&self, user_id: &str) -> Result<SellerProfile, RepositoryError>;

    async fn find_profile(&self, user_id: &str) -> Result<Option<SellerProfile>, RepositoryError>;
}
