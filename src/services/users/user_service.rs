//! # 사용자 조회 서비스 구현
//!
//! 인증 미들웨어가 확인한 사용자를 기준으로 동작합니다. 사용자 생성과 연결은
//! 신원 확인 과정에서만 일어나므로 이 서비스는 읽기 전용입니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    domain::{
        dto::{sessions::AccessResponse, users::response::MeResponse},
        entities::users::SellerProfile,
        models::{access::AccessCheck, auth::AuthenticatedUser},
    },
    repositories::users::{UserRepository, UserStore},
    services::auth::AppTokenService,
};
use crate::errors::errors::{AppError, AppResult, ErrorContext};

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    app_tokens: Arc<AppTokenService>,
}

impl UserService {
    /// 현재 사용자와 기본 프로필
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 확인 직후 사용자가 사라진 경우
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn get_me(&self, user_id: &str) -> AppResult<MeResponse> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let profile = self.user_repo.find_profile(user_id).await?;

        Ok(MeResponse::new(user, profile))
    }

    /// 사용자의 기본 판매자 프로필
    pub async fn find_profile(&self, user_id: &str) -> AppResult<Option<SellerProfile>> {
        self.user_repo
            .find_profile(user_id)
            .await
            .with_context(|| format!("프로필 조회 실패: user={}", user_id))
    }

    /// 앱 리소스 접근 권한
    ///
    /// App 계정이 연결되지 않은 사용자는 플랫폼에 묻지 않고 거부합니다.
    pub async fn check_access(&self, user: &AuthenticatedUser, resource_id: &str) -> AppResult<AccessResponse> {
        let resource_id = validate_resource_id(resource_id)?;

        let check = match user.app_user_id {
            Some(ref app_user_id) => self.app_tokens.check_access(&resource_id, app_user_id).await,
            None => {
                log::debug!("App 미연결 사용자 접근 거부: user={}", user.user_id);
                AccessCheck::denied()
            }
        };

        Ok(AccessResponse::new(resource_id, check))
    }
}

fn validate_resource_id(resource_id: &str) -> AppResult<String> {
    let trimmed = resource_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError("resource id is required".to_string()));
    }
    Ok(trimmed.to_string())
}
