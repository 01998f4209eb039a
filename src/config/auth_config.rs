//! # Authentication Configuration Module
//!
//! 두 인증 프로바이더와 세션 쿠키 관련 설정을 관리합니다.
//!
//! ## 프로바이더
//!
//! 1. **App (Provider A)**: 임베디드 앱(iframe) 환경에서 헤더로 전달되는 사용자 토큰.
//!    우선순위가 가장 높으며, 이메일이 대부분 비어 있습니다.
//! 2. **Web (Provider B)**: 쿠키 세션 기반 로그인. 인증되면 이메일이 항상 존재합니다.
//!
//! ## 환경 변수
//!
//! ### App 플랫폼
//! ```bash
//! export APP_API_BASE_URL="https://api.app-platform.local/v5"
//! export APP_API_KEY="server-api-key"
//! export APP_TOKEN_HEADER="x-app-user-token"
//! export APP_TOKEN_PUBLIC_KEY="-----BEGIN PUBLIC KEY-----..."
//! export APP_TOKEN_AUDIENCE="app_xxxxx"        # 선택
//! export DEV_APP_USER_ID="user_xxxxx"          # Development 전용
//! ```
//!
//! ### Web 세션
//! ```bash
//! export WEB_AUTH_URL="https://project.auth.local"
//! export WEB_AUTH_ANON_KEY="public-anon-key"
//! export WEB_SESSION_COOKIE="sb-access-token"
//! ```
//!
//! ### 로그아웃 플래그
//! ```bash
//! export LOGOUT_COOKIE_NAME="app-logged-out"
//! ```

use std::env;
use crate::config::Environment;

/// Provider A: 임베디드 앱 플랫폼 설정
pub struct AppPlatformConfig;

impl AppPlatformConfig {
    pub fn api_base_url() -> String {
        env::var("APP_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.app-platform.local/v5".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn api_key() -> Option<String> {
        non_empty_var("APP_API_KEY")
    }

    /// 사용자 토큰이 담기는 요청 헤더 이름 (소문자)
    pub fn token_header() -> String {
        env::var("APP_TOKEN_HEADER")
            .unwrap_or_else(|_| "x-app-user-token".to_string())
            .to_lowercase()
    }

    /// 토큰 서명 검증용 ES256 공개키 (PEM)
    pub fn token_public_key() -> Option<String> {
        non_empty_var("APP_TOKEN_PUBLIC_KEY").map(|pem| pem.replace("\\n", "\n"))
    }

    pub fn token_audience() -> Option<String> {
        non_empty_var("APP_TOKEN_AUDIENCE")
    }

    /// 개발 환경 우회용 사용자 ID
    ///
    /// Development 환경이 아니면 설정되어 있어도 항상 `None`입니다.
    pub fn dev_user_id() -> Option<String> {
        Self::dev_user_id_for_env(&Environment::current())
    }

    pub fn dev_user_id_for_env(environment: &Environment) -> Option<String> {
        if environment.is_development() {
            non_empty_var("DEV_APP_USER_ID")
        } else {
            None
        }
    }
}

/// Provider B: 쿠키 세션 인증 서버 설정
pub struct WebSessionConfig;

impl WebSessionConfig {
    pub fn auth_url() -> Option<String> {
        non_empty_var("WEB_AUTH_URL").map(|url| url.trim_end_matches('/').to_string())
    }

    pub fn anon_key() -> Option<String> {
        non_empty_var("WEB_AUTH_ANON_KEY")
    }

    pub fn session_cookie() -> String {
        env::var("WEB_SESSION_COOKIE").unwrap_or_else(|_| "sb-access-token".to_string())
    }
}

/// 로그아웃 플래그 쿠키 설정
pub struct SessionCookieConfig;

impl SessionCookieConfig {
    pub fn logout_cookie_name() -> String {
        env::var("LOGOUT_COOKIE_NAME").unwrap_or_else(|_| "app-logged-out".to_string())
    }

    /// 쿠키 값이 정확히 `"true"`일 때만 로그아웃 상태로 봅니다.
    pub fn is_logged_out_value(value: &str) -> bool {
        value == "true"
    }
}

/// 사용자를 인증한 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Provider A: 임베디드 앱 토큰
    App,

    /// Provider B: 쿠키 세션
    Web,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::App => "app",
            AuthProvider::Web => "web",
        }
    }

    /// 이 프로바이더의 외부 ID가 저장되는 사용자 문서 필드명
    pub fn id_field(&self) -> &'static str {
        match self {
            AuthProvider::App => "app_user_id",
            AuthProvider::Web => "web_user_id",
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_fields() {
        assert_eq!(AuthProvider::App.id_field(), "app_user_id");
        assert_eq!(AuthProvider::Web.id_field(), "web_user_id");
        assert_eq!(AuthProvider::App.as_str(), "app");
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Web).unwrap();
        assert_eq!(json, "\"web\"");

        let deserialized: AuthProvider = serde_json::from_str("\"app\"").unwrap();
        assert_eq!(deserialized, AuthProvider::App);
    }

    #[test]
    fn test_logout_value_is_exact() {
        assert!(SessionCookieConfig::is_logged_out_value("true"));
        assert!(!SessionCookieConfig::is_logged_out_value("TRUE"));
        assert!(!SessionCookieConfig::is_logged_out_value("1"));
        assert!(!SessionCookieConfig::is_logged_out_value(""));
    }

    #[test]
    fn test_dev_user_id_ignored_outside_development() {
        assert_eq!(AppPlatformConfig::dev_user_id_for_env(&Environment::Production), None);
        assert_eq!(AppPlatformConfig::dev_user_id_for_env(&Environment::Staging), None);
    }
}
