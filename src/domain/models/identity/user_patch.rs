use serde::{Deserialize, Serialize};

/// 사용자 문서에 `$set`으로 반영할 변경분
///
/// `None`인 필드는 건드리지 않습니다. 저장소 계층은 값을 지우는 연산을 제공하지 않으므로
/// 연결된 프로바이더 ID가 `null`로 돌아가는 일은 없습니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub app_user_id: Option<String>,
    pub web_user_id: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.app_user_id.is_none()
            && self.web_user_id.is_none()
            && self.email.is_none()
            && self.username.is_none()
            && self.display_name.is_none()
            && self.avatar_url.is_none()
    }

    /// 이 변경이 새 프로바이더 ID를 붙이는지 여부
    pub fn attaches_provider(&self) -> bool {
        self.app_user_id.is_some() || self.web_user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn test_attaching_patch() {
        let patch = UserPatch {
            web_user_id: Some("pB-9".to_string()),
            ..UserPatch::default()
        };

        assert!(!patch.is_empty());
        assert!(patch.attaches_provider());

        let refresh_only = UserPatch {
            display_name: Some("Alice".to_string()),
            ..UserPatch::default()
        };
        assert!(!refresh_only.attaches_provider());
    }
}
