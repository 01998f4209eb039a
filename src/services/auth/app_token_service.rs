//! # Provider A 어댑터 (임베디드 앱 토큰)
//!
//! 임베디드 앱 플랫폼이 iframe 요청 헤더로 넘겨주는 사용자 토큰을 검증하고,
//! 플랫폼 API에서 사용자 프로필을 가져와 [`ProviderCredential`]로 바꿉니다.
//!
//! ## 처리 순서
//!
//! 1. Development 환경에서 `DEV_APP_USER_ID`가 있으면 토큰 검증 없이 해당 사용자를 조회
//! 2. `APP_TOKEN_HEADER` 헤더가 없으면 `Ok(None)`
//! 3. ES256 서명 검증 (`APP_TOKEN_PUBLIC_KEY`, 설정 시 `APP_TOKEN_AUDIENCE`)
//! 4. `GET {APP_API_BASE_URL}/users/{id}`
//!
//! 로그아웃 플래그는 이 어댑터를 호출하기 전에 인증기가 확인합니다.
//!
//! ## 리소스 접근 확인
//!
//! [`AppTokenService::check_access`]는 어떤 이유로든 실패하면 접근 거부로 처리합니다.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use singleton_macro::service;
use crate::config::AppPlatformConfig;
use crate::domain::models::access::AccessCheck;
use crate::domain::models::access::access_check::ACCESS_LEVEL_ADMIN;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::ProviderCredential;
use crate::errors::errors::ProviderError;
use crate::services::identity::AppIdentityProvider;
use crate::utils::string_utils::{deserialize_non_blank_string, deserialize_optional_string};

/// 앱 사용자 토큰 클레임. 만료(`exp`)는 검증 단계에서 확인됩니다.
#[derive(Debug, Deserialize)]
struct AppTokenClaims {
    sub: String,
}

/// 플랫폼 API 사용자 응답
#[derive(Debug, Clone, Deserialize)]
pub struct AppUserPayload {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_blank_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<ProfilePicture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePicture {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub url: Option<String>,
}

impl AppUserPayload {
    pub fn into_credential(self) -> ProviderCredential {
        ProviderCredential {
            external_id: self.id,
            display_name: self.name,
            email: self.email,
            username: self.username,
            avatar_url: self.profile_picture.and_then(|picture| picture.url),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccessPayload {
    #[serde(default)]
    has_access: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    access_level: Option<String>,
}

impl From<AccessPayload> for AccessCheck {
    fn from(payload: AccessPayload) -> Self {
        if !payload.has_access {
            return AccessCheck::denied();
        }
        AccessCheck::granted(payload.access_level.unwrap_or_else(|| "customer".to_string()))
    }
}

#[service(name = "app_token")]
pub struct AppTokenService {
    // 외부 의존성 없음
}

impl AppTokenService {
    /// 요청 헤더의 앱 토큰을 검증하고 사용자 ID(`sub`)를 돌려줍니다.
    pub fn verify_token(&self, token: &str) -> Result<String, ProviderError> {
        let public_key = AppPlatformConfig::token_public_key()
            .ok_or_else(|| ProviderError::MissingConfiguration("APP_TOKEN_PUBLIC_KEY".to_string()))?;

        let decoding_key = DecodingKey::from_ec_pem(public_key.as_bytes())
            .map_err(|e| ProviderError::MissingConfiguration(format!("APP_TOKEN_PUBLIC_KEY 파싱 실패: {}", e)))?;

        let mut validation = Validation::new(Algorithm::ES256);
        match AppPlatformConfig::token_audience() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let claims = decode::<AppTokenClaims>(token, &decoding_key, &validation)
            .map_err(|e| ProviderError::InvalidCredential(format!("앱 토큰 검증 실패: {}", e)))?
            .claims;

        if claims.sub.trim().is_empty() {
            return Err(ProviderError::InvalidCredential("앱 토큰에 사용자 ID가 없습니다".to_string()));
        }

        Ok(claims.sub)
    }

    /// 플랫폼 API에서 사용자 프로필을 조회합니다.
    pub async fn fetch_user(&self, app_user_id: &str) -> Result<AppUserPayload, ProviderError> {
        let api_key = AppPlatformConfig::api_key()
            .ok_or_else(|| ProviderError::MissingConfiguration("APP_API_KEY".to_string()))?;

        let url = format!(
            "{}/users/{}",
            AppPlatformConfig::api_base_url(),
            urlencoding::encode(app_user_id)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("앱 사용자 조회 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "앱 사용자 조회 실패 ({}): {}", status, error_text
            )));
        }

        let payload = response
            .json::<AppUserPayload>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(format!("앱 사용자 응답 파싱 실패: {}", e)))?;

        if payload.id.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("앱 사용자 응답에 id가 없습니다".to_string()));
        }

        Ok(payload)
    }

    /// 앱 사용자가 리소스(experience 등)에 접근할 수 있는지 확인합니다.
    ///
    /// 개발 우회 사용자 ID가 설정되어 있으면 관리자 권한으로 허용합니다.
    pub async fn check_access(&self, resource_id: &str, app_user_id: &str) -> AccessCheck {
        if AppPlatformConfig::dev_user_id().is_some() {
            log::debug!("개발 모드 접근 허용: resource={}", resource_id);
            return AccessCheck::granted(ACCESS_LEVEL_ADMIN);
        }

        match self.request_access(resource_id, app_user_id).await {
            Ok(check) => check,
            Err(e) => {
                log::warn!("접근 권한 확인 실패 (resource={}): {}", resource_id, e);
                AccessCheck::denied()
            }
        }
    }

    async fn request_access(&self, resource_id: &str, app_user_id: &str) -> Result<AccessCheck, ProviderError> {
        let api_key = AppPlatformConfig::api_key()
            .ok_or_else(|| ProviderError::MissingConfiguration("APP_API_KEY".to_string()))?;

        let url = format!(
            "{}/users/{}/access/{}",
            AppPlatformConfig::api_base_url(),
            urlencoding::encode(app_user_id),
            urlencoding::encode(resource_id)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("접근 권한 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!("접근 권한 조회 실패 ({})", response.status())));
        }

        response
            .json::<AccessPayload>()
            .await
            .map(AccessCheck::from)
            .map_err(|e| ProviderError::MalformedResponse(format!("접근 권한 응답 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl AppIdentityProvider for AppTokenService {
    async fn verify(&self, context: &RequestContext) -> Result<Option<ProviderCredential>, ProviderError> {
        if let Some(dev_user_id) = AppPlatformConfig::dev_user_id() {
            log::debug!("개발 모드: 토큰 검증 없이 {} 사용", dev_user_id);
            return self.fetch_user(&dev_user_id).await.map(|user| Some(user.into_credential()));
        }

        let header = AppPlatformConfig::token_header();
        let Some(token) = context.header(&header) else {
            return Ok(None);
        };

        let app_user_id = self.verify_token(token)?;
        let user = self.fetch_user(&app_user_id).await?;

        Ok(Some(user.into_credential()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::access::access_check::ACCESS_LEVEL_NONE;

    #[test]
    fn test_payload_maps_to_credential() {
        let payload: AppUserPayload = serde_json::from_str(r#"{
            "id": "user_123",
            "name": "Creator X",
            "username": "creatorX",
            "email": null,
            "profile_picture": { "url": "https://cdn.local/x.png" }
        }"#).unwrap();

        let credential = payload.into_credential();

        assert_eq!(credential.external_id, "user_123");
        assert_eq!(credential.display_name.as_deref(), Some("Creator X"));
        assert_eq!(credential.username.as_deref(), Some("creatorX"));
        assert_eq!(credential.email, None);
        assert_eq!(credential.avatar_url.as_deref(), Some("https://cdn.local/x.png"));
    }

    #[test]
    fn test_payload_blank_fields_become_absent() {
        let payload: AppUserPayload = serde_json::from_str(r#"{
            "id": "user_123",
            "name": "  ",
            "email": "",
            "profile_picture": { "url": "" }
        }"#).unwrap();

        let credential = payload.into_credential();

        assert_eq!(credential.display_name, None);
        assert_eq!(credential.email, None);
        assert_eq!(credential.username, None);
        assert_eq!(credential.avatar_url, None);
    }

    #[test]
    fn test_access_payload_mapping() {
        let admin: AccessPayload = serde_json::from_str(r#"{"has_access": true, "access_level": "admin"}"#).unwrap();
        let check = AccessCheck::from(admin);
        assert!(check.has_access);
        assert!(check.is_admin());

        let denied: AccessPayload = serde_json::from_str(r#"{"has_access": false, "access_level": "admin"}"#).unwrap();
        assert_eq!(AccessCheck::from(denied), AccessCheck::denied());

        let bare: AccessPayload = serde_json::from_str(r#"{"has_access": true}"#).unwrap();
        let check = AccessCheck::from(bare);
        assert!(check.has_access);
        assert_ne!(check.access_level, ACCESS_LEVEL_NONE);
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let service = AppTokenService {};

        // 공개키가 없으면 설정 오류, 있으면 서명 오류. 어느 쪽이든 통과하지 않습니다.
        let err = service.verify_token("not-a-jwt").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingConfiguration(_) | ProviderError::InvalidCredential(_)
        ));
    }

    #[actix_web::test]
    async fn test_verify_without_header_is_no_credential() {
        let service = AppTokenService {};

        let result = service.verify(&RequestContext::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn test_verify_with_invalid_token_is_error() {
        let service = AppTokenService {};
        let context = RequestContext::new().with_header(&AppPlatformConfig::token_header(), "not-a-jwt");

        assert!(service.verify(&context).await.is_err());
    }
}
