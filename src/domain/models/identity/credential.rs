use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::non_blank;

/// 프로바이더 어댑터가 검증을 마친 뒤 돌려주는 신원 정보
///
/// 리졸버는 이 값을 그대로 신뢰합니다. 빈 문자열은 빌더 단계에서 `None`으로 바뀌므로
/// "값 없음"과 "빈 값"을 구분할 필요가 없습니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ProviderCredential {
    #[validate(length(min = 1, message = "external id must not be empty"))]
    pub external_id: String,
    pub display_name: Option<String>,
    /// Provider A는 대부분 비어 있고, Provider B는 인증되면 항상 존재합니다.
    /// 연결 판단 시 대소문자를 포함해 글자 그대로 비교합니다.
    pub email: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProviderCredential {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(Some(email.into()));
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = non_blank(Some(username.into()));
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = non_blank(Some(display_name.into()));
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = non_blank(Some(avatar_url.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_drops_empty_values() {
        let credential = ProviderCredential::new("pA-1")
            .with_email("")
            .with_username("creatorX")
            .with_display_name("   ")
            .with_avatar_url("https://cdn.local/a.png");

        assert_eq!(credential.email, None);
        assert_eq!(credential.username.as_deref(), Some("creatorX"));
        assert_eq!(credential.display_name, None);
        assert_eq!(credential.avatar_url.as_deref(), Some("https://cdn.local/a.png"));
    }

    #[test]
    fn test_email_is_kept_verbatim() {
        let credential = ProviderCredential::new("pB-1").with_email("Alice@X.com");
        assert_eq!(credential.email.as_deref(), Some("Alice@X.com"));
    }

    #[test]
    fn test_empty_external_id_is_invalid() {
        assert!(ProviderCredential::new("").validate().is_err());
        assert!(ProviderCredential::new("pA-1").validate().is_ok());
    }
}
