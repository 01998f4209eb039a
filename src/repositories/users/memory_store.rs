//! # 인메모리 사용자 저장소
//!
//! [`UserStore`]의 테스트 더블입니다. MongoDB 구현과 같은 유일성 규칙을 지키고,
//! 쓰기 횟수 집계와 장애 주입을 지원합니다.
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryUserStore::new());
//! let resolver = IdentityResolver::new(store.clone());
//!
//! resolver.resolve(Some(credential), None).await?;
//! assert_eq!(store.user_count(), 1);
//!
//! store.fail_writes(true);
//! assert!(resolver.resolve(Some(other), None).await.is_err());
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::domain::entities::users::{SellerProfile, User};
use crate::domain::models::identity::UserPatch;
use crate::errors::errors::RepositoryError;
use super::user_store::UserStore;

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    profiles: Vec<SellerProfile>,
    /// 다음 `create` 직전에 끼워 넣을 문서. 동시 요청이 먼저 생성한 상황을 흉내 냅니다.
    concurrent_winner: Option<User>,
}

#[derive(Default)]
pub struct InMemoryUserStore {
    state: Mutex<MemoryState>,
    writes: AtomicUsize,
    failing: AtomicBool,
    profile_write_fails_once: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_write(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database("injected write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// 저장소 상태를 직접 채웁니다. 쓰기 횟수에는 포함되지 않습니다.
    pub fn seed(&self, mut user: User) -> User {
        if user.id.is_none() {
            user.id = Some(ObjectId::new());
        }
        self.state().users.push(user.clone());
        user
    }

    /// `true`이면 이후 모든 쓰기가 `RepositoryError::Database`로 실패합니다.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 다음 `create` 호출 직전에 `winner`가 먼저 저장된 것처럼 만듭니다.
    /// 다음 `create_default_profile` 한 번만 실패시킵니다.
    pub fn fail_next_profile_write(&self) {
        self.profile_write_fails_once.store(true, Ordering::SeqCst);
    }

    pub fn insert_before_next_create(&self, winner: User) {
        self.state().concurrent_winner = Some(winner);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn profile_count_for(&self, user_id: &str) -> usize {
        self.state()
            .profiles
            .iter()
            .filter(|profile| profile.user_id.to_hex() == user_id)
            .count()
    }

    fn find_first<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.state().users.iter().find(|user| predicate(user)).cloned()
    }
}

fn check_unique(users: &[User], candidate: &User) -> Result<(), RepositoryError> {
    for existing in users.iter().filter(|existing| existing.id != candidate.id) {
        if let (Some(a), Some(b)) = (&existing.app_user_id, &candidate.app_user_id) {
            if a == b {
                return Err(RepositoryError::DuplicateIdentity {
                    field: "app_user_id".to_string(),
                    value: b.clone(),
                });
            }
        }
        if let (Some(a), Some(b)) = (&existing.web_user_id, &candidate.web_user_id) {
            if a == b {
                return Err(RepositoryError::DuplicateIdentity {
                    field: "web_user_id".to_string(),
                    value: b.clone(),
                });
            }
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.id_string().as_deref() == Some(id)))
    }

    async fn find_by_app_user_id(&self, app_user_id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.app_user_id.as_deref() == Some(app_user_id)))
    }

    async fn find_by_web_user_id(&self, web_user_id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.web_user_id.as_deref() == Some(web_user_id)))
    }

    async fn find_by_email_unlinked_app(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.email.as_deref() == Some(email) && user.app_user_id.is_none()))
    }

    async fn find_by_username_unlinked_app(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.username.as_deref() == Some(username) && user.app_user_id.is_none()))
    }

    async fn find_by_email_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| {
            user.email.as_deref() == Some(email) && user.web_user_id.is_none() && user.app_user_id.is_some()
        }))
    }

    async fn find_by_email_and_username_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| {
            user.email.as_deref() == Some(email)
                && user.username.is_some()
                && user.web_user_id.is_none()
                && user.app_user_id.is_some()
        }))
    }

    async fn create(&self, mut user: User) -> Result<User, RepositoryError> {
        self.begin_write()?;
        let mut state = self.state();

        if let Some(mut winner) = state.concurrent_winner.take() {
            winner.id.get_or_insert_with(ObjectId::new);
            state.users.push(winner);
        }

        user.id = Some(ObjectId::new());
        check_unique(&state.users, &user)?;
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, RepositoryError> {
        self.begin_write()?;
        let mut state = self.state();

        let index = state
            .users
            .iter()
            .position(|user| user.id_string().as_deref() == Some(id))
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", id)))?;

        let current = &state.users[index];
        if let (Some(_), Some(value)) = (&current.app_user_id, &patch.app_user_id) {
            return Err(RepositoryError::DuplicateIdentity {
                field: "app_user_id".to_string(),
                value: value.clone(),
            });
        }
        if let (Some(_), Some(value)) = (&current.web_user_id, &patch.web_user_id) {
            return Err(RepositoryError::DuplicateIdentity {
                field: "web_user_id".to_string(),
                value: value.clone(),
            });
        }

        let mut updated = current.clone();
        updated.apply_patch(&patch);
        check_unique(&state.users, &updated)?;

        state.users[index] = updated.clone();
        Ok(updated)
    }

    async fn create_default_profile(&self, user_id: &str) -> Result<SellerProfile, RepositoryError> {
        if self.profile_write_fails_once.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Database("injected profile write failure".to_string()));
        }
        self.begin_write()?;
        let object_id = ObjectId::parse_str(user_id)
            .map_err(|_| RepositoryError::NotFound(format!("user {}", user_id)))?;

        let mut state = self.state();
        if let Some(existing) = state.profiles.iter().find(|profile| profile.user_id == object_id) {
            return Ok(existing.clone());
        }

        let mut profile = SellerProfile::new_default(object_id);
        profile.id = Some(ObjectId::new());
        profile.updated_at = DateTime::now();
        state.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<SellerProfile>, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        Ok(self
            .state()
            .profiles
            .iter()
            .find(|profile| profile.user_id == object_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::models::identity::ProviderCredential;

    fn app_user(external_id: &str) -> User {
        User::from_credential(AuthProvider::App, &ProviderCredential::new(external_id))
    }

    #[actix_web::test]
    async fn test_create_rejects_duplicate_provider_id() {
        let store = InMemoryUserStore::new();
        store.create(app_user("pA-1")).await.unwrap();

        let err = store.create(app_user("pA-1")).await.unwrap_err();
        assert_eq!(
            err,
            RepositoryError::DuplicateIdentity { field: "app_user_id".to_string(), value: "pA-1".to_string() }
        );
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_update_never_overwrites_linked_provider() {
        let store = InMemoryUserStore::new();
        let user = store.seed(app_user("pA-1"));
        let id = user.id_string().unwrap();

        let patch = UserPatch { app_user_id: Some("pA-2".to_string()), ..UserPatch::default() };
        let err = store.update(&id, patch).await.unwrap_err();

        assert!(matches!(err, RepositoryError::DuplicateIdentity { .. }));
        assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().app_user_id.as_deref(), Some("pA-1"));
    }

    #[actix_web::test]
    async fn test_unlinked_lookups_respect_link_state() {
        let store = InMemoryUserStore::new();
        let mut linked = app_user("pA-1");
        linked.email = Some("a@x.com".to_string());
        store.seed(linked);

        assert!(store.find_by_email_unlinked_app("a@x.com").await.unwrap().is_none());
        assert!(store.find_by_email_unlinked_web("a@x.com").await.unwrap().is_some());
        assert!(store.find_by_email_unlinked_web("A@X.com").await.unwrap().is_none());
        assert!(store.find_by_email_and_username_unlinked_web("a@x.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_default_profile_is_unique_per_user() {
        let store = InMemoryUserStore::new();
        let user = store.seed(app_user("pA-1"));
        let id = user.id_string().unwrap();

        let first = store.create_default_profile(&id).await.unwrap();
        let second = store.create_default_profile(&id).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.profile_count_for(&id), 1);
    }

    #[actix_web::test]
    async fn test_injected_failure_blocks_writes() {
        let store = InMemoryUserStore::new();
        store.fail_writes(true);

        let err = store.create(app_user("pA-1")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.write_count(), 0);
    }
}
