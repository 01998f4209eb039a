use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::{SellerProfile, User};

/// RFC 3339 문자열로 바꿉니다. 범위를 벗어난 값은 빈 문자열이 됩니다.
fn to_rfc3339(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub app_user_id: Option<String>,
    pub web_user_id: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,

    /// 두 프로바이더가 모두 연결된 계정인지
    pub is_linked: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let is_linked = user.is_linked();

        let User {
            id,
            app_user_id,
            web_user_id,
            email,
            username,
            display_name,
            avatar_url,
            created_at,
            updated_at,
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            app_user_id,
            web_user_id,
            email,
            username,
            display_name,
            avatar_url,
            is_linked,
            created_at: to_rfc3339(created_at),
            updated_at: to_rfc3339(updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfileResponse {
    pub id: String,
    pub user_id: String,
    pub hourly_rate: f64,
    pub is_active: bool,
    pub bio: Option<String>,
    pub created_at: String,
}

impl From<SellerProfile> for SellerProfileResponse {
    fn from(profile: SellerProfile) -> Self {
        Self {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: profile.user_id.to_hex(),
            hourly_rate: profile.hourly_rate,
            is_active: profile.is_active,
            bio: profile.bio,
            created_at: to_rfc3339(profile.created_at),
        }
    }
}

/// 현재 사용자 + 기본 프로필
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub profile: Option<SellerProfileResponse>,
}

impl MeResponse {
    pub fn new(user: User, profile: Option<SellerProfile>) -> Self {
        Self {
            user: UserResponse::from(user),
            profile: profile.map(SellerProfileResponse::from),
        }
    }
}
