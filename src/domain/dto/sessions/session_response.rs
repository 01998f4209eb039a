use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::dto::users::response::{SellerProfileResponse, UserResponse};
use crate::domain::entities::users::SellerProfile;
use crate::domain::models::identity::{LinkStrategy, ResolvedSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub provider: AuthProvider,
    pub provider_user_id: String,
    /// 사용자를 찾거나 만든 전략 (`by_external_id`, `create_new` 등)
    pub matched_by: LinkStrategy,
    pub is_new_user: bool,
    pub resolved_at: String,
    pub profile: Option<SellerProfileResponse>,
}

impl From<ResolvedSession> for SessionResponse {
    fn from(session: ResolvedSession) -> Self {
        let is_new_user = session.is_new_user();

        Self {
            user: UserResponse::from(session.user),
            provider: session.provider,
            provider_user_id: session.provider_user_id,
            matched_by: session.strategy,
            is_new_user,
            resolved_at: session.resolved_at.to_rfc3339(),
            profile: None,
        }
    }
}

impl SessionResponse {
    pub fn with_profile(mut self, profile: Option<SellerProfile>) -> Self {
        self.profile = profile.map(SellerProfileResponse::from);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::User;
    use crate::domain::models::identity::ProviderCredential;

    #[test]
    fn test_session_response_shape() {
        let user = User::from_credential(AuthProvider::Web, &ProviderCredential::new("pB-9").with_email("a@x.com"));
        let session = ResolvedSession::new(user, AuthProvider::Web, "pB-9".to_string(), LinkStrategy::CreateNew);

        let json = serde_json::to_value(SessionResponse::from(session)).unwrap();

        assert_eq!(json["provider"], "web");
        assert_eq!(json["matched_by"], "create_new");
        assert_eq!(json["is_new_user"], true);
        assert_eq!(json["provider_user_id"], "pB-9");
        assert!(json["profile"].is_null());
    }

    #[test]
    fn test_session_response_with_profile() {
        let mut user = User::from_credential(AuthProvider::App, &ProviderCredential::new("pA-1"));
        let id = mongodb::bson::oid::ObjectId::new();
        user.id = Some(id);
        let session = ResolvedSession::new(user, AuthProvider::App, "pA-1".to_string(), LinkStrategy::ByExternalId);

        let response = SessionResponse::from(session).with_profile(Some(SellerProfile::new_default(id)));

        assert!(!response.is_new_user);
        assert_eq!(response.profile.map(|p| p.user_id), Some(id.to_hex()));
    }
}
