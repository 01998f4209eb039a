use serde::{Deserialize, Serialize};

pub const ACCESS_LEVEL_ADMIN: &str = "admin";
pub const ACCESS_LEVEL_NONE: &str = "no_access";

/// Provider A의 리소스 접근 권한 확인 결과
///
/// 확인 과정에서 무슨 일이 있어도 오류 대신 [`AccessCheck::denied`]로 내려갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessCheck {
    pub has_access: bool,
    pub access_level: String,
}

impl AccessCheck {
    pub fn denied() -> Self {
        Self {
            has_access: false,
            access_level: ACCESS_LEVEL_NONE.to_string(),
        }
    }

    pub fn granted(access_level: impl Into<String>) -> Self {
        Self {
            has_access: true,
            access_level: access_level.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.access_level == ACCESS_LEVEL_ADMIN
    }
}
