//! 전략별 조회와 갱신 규칙
//!
//! 각 [`LinkStrategy`]는 두 가지를 압니다.
//!
//! - `find`: 저장소에서 후보 사용자를 찾는 방법
//! - `patch`: 찾은 사용자에 반영할 변경분
//!
//! 프로필 필드는 새 값이 비어 있지 않고 저장된 값과 다를 때만 덮어씁니다.

use crate::config::AuthProvider;
use crate::domain::entities::users::User;
use crate::domain::models::identity::{LinkStrategy, ProviderCredential, UserPatch};
use crate::errors::errors::RepositoryError;
use crate::repositories::users::UserStore;

impl LinkStrategy {
    /// 이 전략으로 후보 사용자를 찾습니다.
    ///
    /// 필요한 키(이메일, 사용자명)가 자격 증명에 없거나 해당 프로바이더에 없는 전략이면
    /// 저장소를 조회하지 않고 `Ok(None)`을 돌려줍니다. `CreateNew`도 마찬가지입니다.
    pub async fn find(
        &self,
        store: &dyn UserStore,
        provider: AuthProvider,
        credential: &ProviderCredential,
    ) -> Result<Option<User>, RepositoryError> {
        match (self, provider) {
            (LinkStrategy::ByExternalId, AuthProvider::App) => {
                store.find_by_app_user_id(&credential.external_id).await
            }
            (LinkStrategy::ByExternalId, AuthProvider::Web) => {
                store.find_by_web_user_id(&credential.external_id).await
            }
            (LinkStrategy::ByEmailUnlinked, AuthProvider::App) => match credential.email {
                Some(ref email) => store.find_by_email_unlinked_app(email).await,
                None => Ok(None),
            },
            (LinkStrategy::ByEmailUnlinked, AuthProvider::Web) => match credential.email {
                Some(ref email) => store.find_by_email_unlinked_web(email).await,
                None => Ok(None),
            },
            (LinkStrategy::ByUsernameUnlinked, AuthProvider::App) => match credential.username {
                Some(ref username) => store.find_by_username_unlinked_app(username).await,
                None => Ok(None),
            },
            (LinkStrategy::ByEmailAndUsernameUnlinked, AuthProvider::Web) => match credential.email {
                Some(ref email) => store.find_by_email_and_username_unlinked_web(email).await,
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// 이 전략으로 찾은 사용자에 반영할 변경분을 계산합니다.
    pub fn patch(&self, provider: AuthProvider, user: &User, credential: &ProviderCredential) -> UserPatch {
        let mut patch = UserPatch {
            display_name: prefer_new(&credential.display_name, &user.display_name),
            avatar_url: prefer_new(&credential.avatar_url, &user.avatar_url),
            ..UserPatch::default()
        };

        if self.is_linking() {
            let external_id = Some(credential.external_id.clone());
            match provider {
                AuthProvider::App => patch.app_user_id = external_id,
                AuthProvider::Web => patch.web_user_id = external_id,
            }
        }

        match (self, provider) {
            (LinkStrategy::ByExternalId, AuthProvider::App) => {
                patch.username = prefer_new(&credential.username, &user.username);
                patch.email = fill_empty(&credential.email, &user.email);
            }
            (LinkStrategy::ByExternalId, AuthProvider::Web) => {
                patch.email = prefer_new(&credential.email, &user.email);
            }
            (LinkStrategy::ByEmailUnlinked, AuthProvider::App) => {
                patch.username = prefer_new(&credential.username, &user.username);
            }
            (LinkStrategy::ByUsernameUnlinked, AuthProvider::App) => {
                patch.email = fill_empty(&credential.email, &user.email);
            }
            (LinkStrategy::CreateNew, _) => return UserPatch::default(),
            _ => {}
        }

        patch
    }
}

fn prefer_new(new: &Option<String>, stored: &Option<String>) -> Option<String> {
    match new {
        Some(value) if stored.as_deref() != Some(value.as_str()) => Some(value.clone()),
        _ => None,
    }
}

fn fill_empty(new: &Option<String>, stored: &Option<String>) -> Option<String> {
    if stored.is_some() {
        None
    } else {
        new.clone()
    }
}
