//! 사용자 엔티티
//!
//! 두 프로바이더의 외부 ID를 함께 담을 수 있는 정규(canonical) 사용자 문서입니다.
//!
//! - `app_user_id`, `web_user_id`는 값이 있을 때 각각 유일합니다 (부분 유니크 인덱스).
//! - 생성 이후 두 ID가 모두 비어 있는 문서는 존재하지 않습니다.
//! - 한 번 연결된 프로바이더 ID는 다시 분리되지 않습니다.
//! - `email`, `username`은 연결 판단에 쓰이는 "약한 유일" 키입니다. 스키마 수준 제약은 없습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::models::identity::credential::ProviderCredential;
use crate::domain::models::identity::user_patch::UserPatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Provider A 외부 ID. 미연결이면 `null`로 저장됩니다.
    #[serde(default)]
    pub app_user_id: Option<String>,
    /// Provider B 외부 ID. 미연결이면 `null`로 저장됩니다.
    #[serde(default)]
    pub web_user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 처음 보는 외부 ID로 새 사용자를 만듭니다. 저장 전이므로 `id`는 비어 있습니다.
    pub fn from_credential(provider: AuthProvider, credential: &ProviderCredential) -> Self {
        let now = DateTime::now();
        let external_id = Some(credential.external_id.clone());

        let (app_user_id, web_user_id) = match provider {
            AuthProvider::App => (external_id, None),
            AuthProvider::Web => (None, external_id),
        };

        Self {
            id: None,
            app_user_id,
            web_user_id,
            email: credential.email.clone(),
            username: credential.username.clone(),
            display_name: credential.display_name.clone(),
            avatar_url: credential.avatar_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn provider_user_id(&self, provider: AuthProvider) -> Option<&str> {
        match provider {
            AuthProvider::App => self.app_user_id.as_deref(),
            AuthProvider::Web => self.web_user_id.as_deref(),
        }
    }

    /// 두 프로바이더가 모두 연결된 계정인지 확인합니다.
    pub fn is_linked(&self) -> bool {
        self.app_user_id.is_some() && self.web_user_id.is_some()
    }

    /// 변경분을 메모리상의 문서에 반영합니다. 저장소 구현이 같은 규칙을 쓰도록 한곳에 둡니다.
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(ref value) = patch.app_user_id {
            self.app_user_id = Some(value.clone());
        }
        if let Some(ref value) = patch.web_user_id {
            self.web_user_id = Some(value.clone());
        }
        if let Some(ref value) = patch.email {
            self.email = Some(value.clone());
        }
        if let Some(ref value) = patch.username {
            self.username = Some(value.clone());
        }
        if let Some(ref value) = patch.display_name {
            self.display_name = Some(value.clone());
        }
        if let Some(ref value) = patch.avatar_url {
            self.avatar_url = Some(value.clone());
        }
        self.updated_at = DateTime::now();
    }
}
