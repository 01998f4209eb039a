//! 기본 판매자 프로필 엔티티
//!
//! 사용자가 처음 생성될 때 함께 만들어지는 부속 문서입니다. 사용자당 정확히 하나이며
//! (`user_id` 유니크 인덱스), 조회나 연결 시에는 만들지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub hourly_rate: f64,
    pub is_active: bool,
    #[serde(default)]
    pub bio: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl SellerProfile {
    /// 시급 0, 활성 상태의 기본 프로필
    pub fn new_default(user_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            hourly_rate: 0.0,
            is_active: true,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let user_id = ObjectId::new();
        let profile = SellerProfile::new_default(user_id);

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.hourly_rate, 0.0);
        assert!(profile.is_active);
        assert!(profile.id.is_none());
    }
}
