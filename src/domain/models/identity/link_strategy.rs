use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 정규 사용자를 찾거나 만드는 방법
///
/// 프로바이더별 파이프라인은 고정 순서이며 처음 일치한 전략에서 멈춥니다.
/// 뒤쪽 전략은 앞의 전략이 모두 실패했다는 전제를 깔고 있으므로 순서를 바꾸면 안 됩니다.
///
/// | 순서 | App (Provider A) | Web (Provider B) |
/// |------|------------------|------------------|
/// | 1 | `ByExternalId` | `ByExternalId` |
/// | 2 | `ByEmailUnlinked` | `ByEmailUnlinked` (App 연결 계정만) |
/// | 3 | `ByUsernameUnlinked` | `ByEmailAndUsernameUnlinked` |
/// | 4 | `CreateNew` | `CreateNew` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    ByExternalId,
    ByEmailUnlinked,
    /// App 전용. 이메일보다 신뢰도가 낮은 마지막 연결 수단입니다.
    ByUsernameUnlinked,
    /// Web 전용. 이메일 일치 + 사용자명 존재를 함께 요구하는 2차 연결 수단입니다.
    ByEmailAndUsernameUnlinked,
    CreateNew,
}

const APP_PIPELINE: [LinkStrategy; 4] = [
    LinkStrategy::ByExternalId,
    LinkStrategy::ByEmailUnlinked,
    LinkStrategy::ByUsernameUnlinked,
    LinkStrategy::CreateNew,
];

const WEB_PIPELINE: [LinkStrategy; 4] = [
    LinkStrategy::ByExternalId,
    LinkStrategy::ByEmailUnlinked,
    LinkStrategy::ByEmailAndUsernameUnlinked,
    LinkStrategy::CreateNew,
];

impl LinkStrategy {
    pub fn pipeline(provider: AuthProvider) -> &'static [LinkStrategy] {
        match provider {
            AuthProvider::App => &APP_PIPELINE,
            AuthProvider::Web => &WEB_PIPELINE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStrategy::ByExternalId => "by_external_id",
            LinkStrategy::ByEmailUnlinked => "by_email_unlinked",
            LinkStrategy::ByUsernameUnlinked => "by_username_unlinked",
            LinkStrategy::ByEmailAndUsernameUnlinked => "by_email_and_username_unlinked",
            LinkStrategy::CreateNew => "create_new",
        }
    }

    /// 기존 사용자에 새 프로바이더 ID를 붙이는 전략인지 여부
    pub fn is_linking(&self) -> bool {
        matches!(
            self,
            LinkStrategy::ByEmailUnlinked
                | LinkStrategy::ByUsernameUnlinked
                | LinkStrategy::ByEmailAndUsernameUnlinked
        )
    }
}

impl std::fmt::Display for LinkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipelines_start_with_id_and_end_with_create() {
        for provider in [AuthProvider::App, AuthProvider::Web] {
            let pipeline = LinkStrategy::pipeline(provider);
            assert_eq!(pipeline.first(), Some(&LinkStrategy::ByExternalId));
            assert_eq!(pipeline.last(), Some(&LinkStrategy::CreateNew));
        }
    }

    #[test]
    fn test_email_precedes_username_for_app() {
        let pipeline = LinkStrategy::pipeline(AuthProvider::App);
        let email = pipeline.iter().position(|s| *s == LinkStrategy::ByEmailUnlinked);
        let username = pipeline.iter().position(|s| *s == LinkStrategy::ByUsernameUnlinked);

        assert!(email < username);
        assert!(!pipeline.contains(&LinkStrategy::ByEmailAndUsernameUnlinked));
    }

    #[test]
    fn test_web_pipeline_has_no_username_only_step() {
        let pipeline = LinkStrategy::pipeline(AuthProvider::Web);
        assert!(!pipeline.contains(&LinkStrategy::ByUsernameUnlinked));
        assert_eq!(pipeline[2], LinkStrategy::ByEmailAndUsernameUnlinked);
    }

    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&LinkStrategy::ByEmailUnlinked).unwrap();
        assert_eq!(json, "\"by_email_unlinked\"");
        assert_eq!(LinkStrategy::CreateNew.to_string(), "create_new");
        assert!(LinkStrategy::ByUsernameUnlinked.is_linking());
        assert!(!LinkStrategy::CreateNew.is_linking());
    }
}
