use serde::{Deserialize, Serialize};
use crate::domain::models::access::AccessCheck;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessResponse {
    pub resource_id: String,
    pub has_access: bool,
    pub access_level: String,
    pub is_admin: bool,
}

impl AccessResponse {
    pub fn new(resource_id: String, check: AccessCheck) -> Self {
        let is_admin = check.is_admin();

        Self {
            resource_id,
            has_access: check.has_access,
            access_level: check.access_level,
            is_admin,
        }
    }
}
