//! # 신원 리졸버
//!
//! 검증된 프로바이더 자격 증명(0~2개)을 하나의 정규 사용자로 바꿉니다.
//!
//! ## 처리 순서
//!
//! 1. App 자격 증명이 있으면 App 파이프라인만 실행합니다.
//! 2. 없고 Web 자격 증명이 있으면 Web 파이프라인을 실행합니다.
//! 3. 둘 다 없으면 [`Resolution::Unauthenticated`].
//!
//! 파이프라인은 [`LinkStrategy::pipeline`] 순서대로 조회하고 처음 찾은 사용자에서 멈춥니다.
//! 아무것도 찾지 못하면 새 사용자와 기본 프로필을 만듭니다. 찾은 사용자에게 프로필이 없으면
//! 그때 만듭니다.
//!
//! ## 동시 생성 경합
//!
//! 같은 외부 ID로 동시에 들어온 요청이 먼저 사용자를 만들면 저장소가
//! [`RepositoryError::DuplicateIdentity`]를 돌려줍니다. 이때 `ByExternalId`로 한 번 더
//! 조회해 승자의 문서를 사용합니다. 그래도 없으면 에러를 그대로 전파합니다.
//!
//! 저장소 에러는 삼키지 않습니다. 호출자는 이를 "미인증"이 아니라 실패로 처리해야 합니다.

use std::sync::Arc;
use crate::config::AuthProvider;
use crate::domain::entities::users::User;
use crate::domain::models::identity::{LinkStrategy, ProviderCredential, Resolution, ResolvedSession};
use crate::errors::errors::RepositoryError;
use crate::repositories::users::UserStore;

pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(
        &self,
        app: Option<ProviderCredential>,
        web: Option<ProviderCredential>,
    ) -> Result<Resolution, RepositoryError> {
        if let Some(credential) = app {
            return self.resolve_for(AuthProvider::App, &credential).await.map(Resolution::Authenticated);
        }

        if let Some(credential) = web {
            return self.resolve_for(AuthProvider::Web, &credential).await.map(Resolution::Authenticated);
        }

        Ok(Resolution::Unauthenticated)
    }

    /// 한 프로바이더의 파이프라인을 실행합니다.
    pub async fn resolve_for(
        &self,
        provider: AuthProvider,
        credential: &ProviderCredential,
    ) -> Result<ResolvedSession, RepositoryError> {
        for &strategy in LinkStrategy::pipeline(provider) {
            if strategy == LinkStrategy::CreateNew {
                break;
            }

            let Some(user) = strategy.find(self.store.as_ref(), provider, credential).await? else {
                continue;
            };

            log::debug!("{} 전략 일치: user={}", strategy, user.id_string().unwrap_or_default());

            return match self.apply(strategy, provider, user, credential).await {
                Ok(user) => {
                    self.ensure_profile(&user).await?;
                    Ok(self.session(user, provider, credential, strategy))
                }
                Err(RepositoryError::DuplicateIdentity { field, value }) if strategy.is_linking() => {
                    log::warn!("{} 연결 중 경합 감지 ({}={}), 외부 ID로 재조회", strategy, field, value);
                    self.recover_race(provider, credential, RepositoryError::DuplicateIdentity { field, value }).await
                }
                Err(e) => Err(e),
            };
        }

        self.create(provider, credential).await
    }

    async fn apply(
        &self,
        strategy: LinkStrategy,
        provider: AuthProvider,
        user: User,
        credential: &ProviderCredential,
    ) -> Result<User, RepositoryError> {
        let patch = strategy.patch(provider, &user, credential);
        if patch.is_empty() {
            return Ok(user);
        }

        let id = user.id_string()
            .ok_or_else(|| RepositoryError::NotFound("stored user without id".to_string()))?;

        self.store.update(&id, patch).await
    }

    async fn create(
        &self,
        provider: AuthProvider,
        credential: &ProviderCredential,
    ) -> Result<ResolvedSession, RepositoryError> {
        let user = match self.store.create(User::from_credential(provider, credential)).await {
            Ok(user) => user,
            Err(err @ RepositoryError::DuplicateIdentity { .. }) => {
                log::warn!("{} 사용자 동시 생성 감지: {}", provider.as_str(), err);
                return self.recover_race(provider, credential, err).await;
            }
            Err(e) => return Err(e),
        };

        let user_id = user.id_string()
            .ok_or_else(|| RepositoryError::Database("created user has no id".to_string()))?;

        // 사용자 문서와 같은 트랜잭션이 아니므로 실패하면 사용자만 남습니다
        self.store.create_default_profile(&user_id).await?;

        log::info!("새 사용자 생성: {} ({}={})", user_id, provider.id_field(), credential.external_id);
        Ok(self.session(user, provider, credential, LinkStrategy::CreateNew))
    }

    /// 기존 사용자에게 기본 프로필이 없으면 만듭니다.
    ///
    /// 생성 직후 프로필 쓰기가 실패해 사용자만 남은 경우가 다음 로그인에서 복구됩니다.
    async fn ensure_profile(&self, user: &User) -> Result<(), RepositoryError> {
        let user_id = user.id_string()
            .ok_or_else(|| RepositoryError::NotFound("stored user without id".to_string()))?;

        if self.store.find_profile(&user_id).await?.is_none() {
            log::warn!("기본 프로필 누락, 다시 생성: user={}", user_id);
            self.store.create_default_profile(&user_id).await?;
        }

        Ok(())
    }

    /// 경합에서 진 요청을 승자의 문서로 이어 줍니다. 한 번만 시도합니다.
    async fn recover_race(
        &self,
        provider: AuthProvider,
        credential: &ProviderCredential,
        original: RepositoryError,
    ) -> Result<ResolvedSession, RepositoryError> {
        let strategy = LinkStrategy::ByExternalId;

        match strategy.find(self.store.as_ref(), provider, credential).await? {
            Some(winner) => {
                let user = self.apply(strategy, provider, winner, credential).await?;
                self.ensure_profile(&user).await?;
                Ok(self.session(user, provider, credential, strategy))
            }
            None => Err(original),
        }
    }

    fn session(
        &self,
        user: User,
        provider: AuthProvider,
        credential: &ProviderCredential,
        strategy: LinkStrategy,
    ) -> ResolvedSession {
        ResolvedSession::new(user, provider, credential.external_id.clone(), strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserStore;

    fn setup() -> (Arc<InMemoryUserStore>, IdentityResolver) {
        let store = Arc::new(InMemoryUserStore::new());
        let resolver = IdentityResolver::new(store.clone());
        (store, resolver)
    }

    async fn resolve_app(resolver: &IdentityResolver, credential: ProviderCredential) -> ResolvedSession {
        resolver.resolve(Some(credential), None).await.unwrap().into_session().unwrap()
    }

    async fn resolve_web(resolver: &IdentityResolver, credential: ProviderCredential) -> ResolvedSession {
        resolver.resolve(None, Some(credential)).await.unwrap().into_session().unwrap()
    }

    fn seeded(app_id: Option<&str>, web_id: Option<&str>, email: Option<&str>, username: Option<&str>) -> User {
        let mut user = User::from_credential(AuthProvider::App, &ProviderCredential::new("seed"));
        user.app_user_id = app_id.map(str::to_string);
        user.web_user_id = web_id.map(str::to_string);
        user.email = email.map(str::to_string);
        user.username = username.map(str::to_string);
        user
    }

    #[actix_web::test]
    async fn test_no_credentials_is_unauthenticated() {
        let (store, resolver) = setup();

        let resolution = resolver.resolve(None, None).await.unwrap();

        assert!(!resolution.is_authenticated());
        assert_eq!(store.write_count(), 0);
    }

    #[actix_web::test]
    async fn test_new_app_user_with_username_only() {
        let (store, resolver) = setup();

        let session = resolve_app(&resolver, ProviderCredential::new("pA-1").with_username("creatorX")).await;

        assert_eq!(session.strategy, LinkStrategy::CreateNew);
        assert_eq!(session.user.app_user_id.as_deref(), Some("pA-1"));
        assert_eq!(session.user.username.as_deref(), Some("creatorX"));
        assert_eq!(session.user.email, None);
        assert_eq!(session.user.web_user_id, None);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.profile_count_for(&session.user_id()), 1);
    }

    #[actix_web::test]
    async fn test_repeated_resolution_is_idempotent() {
        let (store, resolver) = setup();
        let credential = ProviderCredential::new("pA-1").with_username("creatorX").with_display_name("X");

        let first = resolve_app(&resolver, credential.clone()).await;
        let writes_after_first = store.write_count();
        let second = resolve_app(&resolver, credential).await;

        assert_eq!(first.user_id(), second.user_id());
        assert_eq!(second.strategy, LinkStrategy::ByExternalId);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.write_count(), writes_after_first);
        assert_eq!(store.profile_count_for(&first.user_id()), 1);
    }

    #[actix_web::test]
    async fn test_web_login_links_to_app_account_by_email() {
        let (store, resolver) = setup();
        let app = resolve_app(&resolver, ProviderCredential::new("pA-1").with_email("a@x.com")).await;

        let web = resolve_web(&resolver, ProviderCredential::new("pB-9").with_email("a@x.com")).await;

        assert_eq!(web.user_id(), app.user_id());
        assert_eq!(web.strategy, LinkStrategy::ByEmailUnlinked);
        assert_eq!(web.user.app_user_id.as_deref(), Some("pA-1"));
        assert_eq!(web.user.web_user_id.as_deref(), Some("pB-9"));
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_existing_app_row_gains_web_id_without_new_row() {
        let (store, resolver) = setup();
        let u1 = store.seed(seeded(Some("pA-1"), None, Some("a@x.com"), None));

        let session = resolve_web(&resolver, ProviderCredential::new("pB-9").with_email("a@x.com")).await;

        assert_eq!(session.user.id, u1.id);
        assert_eq!(session.user.web_user_id.as_deref(), Some("pB-9"));
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.profile_count_for(&session.user_id()), 1);
    }

    #[actix_web::test]
    async fn test_email_case_mismatch_does_not_link() {
        let (store, resolver) = setup();
        let app_only = store.seed(seeded(Some("pA-1"), None, Some("e1@x.com"), None));
        store.seed(seeded(None, Some("pB-2"), Some("e2@x.com"), None));

        let session = resolve_web(&resolver, ProviderCredential::new("pB-3").with_email("E1@x.com")).await;

        assert_eq!(session.strategy, LinkStrategy::CreateNew);
        assert_ne!(session.user.id, app_only.id);
        assert_eq!(store.user_count(), 3);
        let untouched = store.users().into_iter().find(|u| u.id == app_only.id).unwrap();
        assert_eq!(untouched.web_user_id, None);
    }

    #[actix_web::test]
    async fn test_web_email_never_links_to_web_only_row() {
        let (store, resolver) = setup();
        let web_only = store.seed(seeded(None, Some("pB-2"), Some("e2@x.com"), None));

        let session = resolve_web(&resolver, ProviderCredential::new("pB-3").with_email("e2@x.com")).await;

        assert_eq!(session.strategy, LinkStrategy::CreateNew);
        assert_ne!(session.user.id, web_only.id);
    }

    #[actix_web::test]
    async fn test_email_match_wins_over_username_match() {
        let (store, resolver) = setup();
        let by_username = store.seed(seeded(None, Some("pB-1"), Some("u@x.com"), Some("creatorX")));
        let by_email = store.seed(seeded(None, Some("pB-2"), Some("a@x.com"), Some("other")));

        let session = resolve_app(
            &resolver,
            ProviderCredential::new("pA-1").with_email("a@x.com").with_username("creatorX"),
        ).await;

        assert_eq!(session.strategy, LinkStrategy::ByEmailUnlinked);
        assert_eq!(session.user.id, by_email.id);
        assert_eq!(session.user.app_user_id.as_deref(), Some("pA-1"));
        let skipped = store.users().into_iter().find(|u| u.id == by_username.id).unwrap();
        assert_eq!(skipped.app_user_id, None);
    }

    #[actix_web::test]
    async fn test_username_fallback_links_and_fills_email() {
        let (store, resolver) = setup();
        let existing = store.seed(seeded(None, Some("pB-1"), None, Some("creatorX")));

        let session = resolve_app(
            &resolver,
            ProviderCredential::new("pA-1").with_email("a@x.com").with_username("creatorX"),
        ).await;

        assert_eq!(session.strategy, LinkStrategy::ByUsernameUnlinked);
        assert_eq!(session.user.id, existing.id);
        assert_eq!(session.user.email.as_deref(), Some("a@x.com"));
        assert!(session.user.is_linked());
    }

    #[actix_web::test]
    async fn test_app_credential_takes_priority_over_web() {
        let (store, resolver) = setup();

        let session = resolver
            .resolve(
                Some(ProviderCredential::new("pA-1")),
                Some(ProviderCredential::new("pB-9").with_email("a@x.com")),
            )
            .await
            .unwrap()
            .into_session()
            .unwrap();

        assert_eq!(session.provider, AuthProvider::App);
        assert_eq!(session.user.web_user_id, None);
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_every_creation_provisions_one_profile() {
        let (store, resolver) = setup();

        let app = resolve_app(&resolver, ProviderCredential::new("pA-1")).await;
        let web = resolve_web(&resolver, ProviderCredential::new("pB-1").with_email("b@x.com")).await;

        assert_eq!(store.profile_count_for(&app.user_id()), 1);
        assert_eq!(store.profile_count_for(&web.user_id()), 1);
    }

    #[actix_web::test]
    async fn test_existing_profile_fields_refresh_only_with_new_values() {
        let (_store, resolver) = setup();
        resolve_web(
            &resolver,
            ProviderCredential::new("pB-1")
                .with_email("b@x.com")
                .with_display_name("Bob")
                .with_avatar_url("https://cdn.local/1.png"),
        ).await;

        let session = resolve_web(
            &resolver,
            ProviderCredential::new("pB-1").with_email("b@x.com").with_display_name("Robert"),
        ).await;

        assert_eq!(session.user.display_name.as_deref(), Some("Robert"));
        assert_eq!(session.user.avatar_url.as_deref(), Some("https://cdn.local/1.png"));
    }

    #[actix_web::test]
    async fn test_concurrent_create_reuses_winner() {
        let (store, resolver) = setup();
        let winner = seeded(Some("pA-1"), None, None, Some("creatorX"));
        store.insert_before_next_create(winner);

        let session = resolve_app(&resolver, ProviderCredential::new("pA-1").with_username("creatorX")).await;

        assert_eq!(session.strategy, LinkStrategy::ByExternalId);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.profile_count_for(&session.user_id()), 1);
    }

    #[actix_web::test]
    async fn test_repository_failure_propagates() {
        let (store, resolver) = setup();
        store.fail_writes(true);

        let err = resolver.resolve(Some(ProviderCredential::new("pA-1")), None).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Database(_)));
        assert_eq!(store.user_count(), 0);
    }

    #[actix_web::test]
    async fn test_missing_profile_is_created_on_next_sign_in() {
        let (store, resolver) = setup();
        store.fail_next_profile_write();

        let first = resolver.resolve(Some(ProviderCredential::new("pA-1")), None).await;
        assert!(first.is_err());
        assert_eq!(store.user_count(), 1);

        let session = resolve_app(&resolver, ProviderCredential::new("pA-1")).await;

        assert_eq!(session.strategy, LinkStrategy::ByExternalId);
        assert_eq!(store.profile_count_for(&session.user_id()), 1);
    }
}
