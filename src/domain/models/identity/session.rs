use chrono::{DateTime, Utc};
use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;
use crate::domain::models::identity::link_strategy::LinkStrategy;

/// 신원 확인이 성공했을 때의 결과
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// 이번 요청의 정규 사용자
    pub user: User,
    /// 인증에 사용된 프로바이더
    pub provider: AuthProvider,
    pub provider_user_id: String,
    /// 사용자를 찾거나 만든 전략
    pub strategy: LinkStrategy,
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedSession {
    pub fn new(user: User, provider: AuthProvider, provider_user_id: String, strategy: LinkStrategy) -> Self {
        Self {
            user,
            provider,
            provider_user_id,
            strategy,
            resolved_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> String {
        self.user.id_string().unwrap_or_default()
    }

    pub fn is_new_user(&self) -> bool {
        self.strategy == LinkStrategy::CreateNew
    }
}

/// 리졸버의 최종 결과
///
/// `Unauthenticated`는 오류가 아니라 "세션 없음"이라는 정상 결과입니다.
#[derive(Debug, Clone)]
pub enum Resolution {
    Authenticated(ResolvedSession),
    Unauthenticated,
}

impl Resolution {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Resolution::Authenticated(_))
    }

    pub fn session(&self) -> Option<&ResolvedSession> {
        match self {
            Resolution::Authenticated(session) => Some(session),
            Resolution::Unauthenticated => None,
        }
    }

    pub fn into_session(self) -> Option<ResolvedSession> {
        match self {
            Resolution::Authenticated(session) => Some(session),
            Resolution::Unauthenticated => None,
        }
    }
}
