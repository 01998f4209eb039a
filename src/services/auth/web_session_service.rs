//! # Provider B 어댑터 (웹 세션 쿠키)
//!
//! 세션 쿠키의 액세스 토큰으로 인증 서버의 `GET /auth/v1/user`를 호출해 현재 사용자를 확인합니다.
//!
//! | 응답 | 결과 |
//! |------|------|
//! | 쿠키 없음 | `Ok(None)` |
//! | 200 | `Ok(Some(credential))` |
//! | 401 / 403 | `ProviderError::InvalidCredential` |
//! | 그 밖의 실패 | `ProviderError::Unavailable` |

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use singleton_macro::service;
use crate::config::WebSessionConfig;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::ProviderCredential;
use crate::errors::errors::ProviderError;
use crate::services::identity::WebIdentityProvider;
use crate::utils::string_utils::{deserialize_non_blank_string, first_non_blank};

#[derive(Debug, Clone, Deserialize)]
pub struct WebUserPayload {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_non_blank_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: WebUserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebUserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl WebUserPayload {
    pub fn into_credential(self) -> ProviderCredential {
        let metadata = self.user_metadata;

        ProviderCredential {
            external_id: self.id,
            display_name: first_non_blank(metadata.full_name, metadata.name),
            email: self.email,
            username: None,
            avatar_url: first_non_blank(metadata.avatar_url, metadata.picture),
        }
    }
}

fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::InvalidCredential(format!("세션이 유효하지 않습니다 ({})", status))
        }
        _ => ProviderError::Unavailable(format!("세션 조회 실패 ({}): {}", status, body)),
    }
}

#[service(name = "web_session")]
pub struct WebSessionService {
    // 외부 의존성 없음
}

impl WebSessionService {
    /// 액세스 토큰으로 인증 서버에 현재 사용자를 묻습니다.
    pub async fn fetch_user(&self, access_token: &str) -> Result<WebUserPayload, ProviderError> {
        let auth_url = WebSessionConfig::auth_url()
            .ok_or_else(|| ProviderError::MissingConfiguration("WEB_AUTH_URL".to_string()))?;
        let anon_key = WebSessionConfig::anon_key()
            .ok_or_else(|| ProviderError::MissingConfiguration("WEB_AUTH_ANON_KEY".to_string()))?;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/auth/v1/user", auth_url))
            .header("apikey", anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("세션 조회 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &error_text));
        }

        let payload = response
            .json::<WebUserPayload>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(format!("세션 사용자 파싱 실패: {}", e)))?;

        if payload.id.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("세션 사용자 id가 없습니다".to_string()));
        }

        Ok(payload)
    }
}

#[async_trait]
impl WebIdentityProvider for WebSessionService {
    async fn current_session(&self, context: &RequestContext) -> Result<Option<ProviderCredential>, ProviderError> {
        let cookie_name = WebSessionConfig::session_cookie();
        let Some(access_token) = context.cookie(&cookie_name).filter(|token| !token.is_empty()) else {
            return Ok(None);
        };

        let user = self.fetch_user(access_token).await?;
        Ok(Some(user.into_credential()))
    }
}
