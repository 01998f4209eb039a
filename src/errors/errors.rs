//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 세 가지 계층의 에러를 구분합니다.
//!
//! | 타입 | 발생 위치 | 전파 정책 |
//! |------|-----------|-----------|
//! | [`ProviderError`] | 인증 프로바이더 어댑터 | 로그만 남기고 "자격 증명 없음"으로 처리 |
//! | [`RepositoryError`] | 사용자 저장소 | 호출자에게 그대로 전파 |
//! | [`AppError`] | HTTP 계층 | `actix_web::ResponseError`로 응답 변환 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, RepositoryError};
//!
//! async fn load(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
//!     let user = store.find_by_id(id).await?   // RepositoryError → AppError
//!         .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;
//!     Ok(user)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 핸들러가 반환하면 자동으로 HTTP 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 신원 확인(계정 연동) 실패 (500 Internal Server Error)
    ///
    /// 상세 원인은 서버 로그에만 남기고, 클라이언트에는 재시도 안내만 전달합니다.
    #[error("Sign-in could not be completed. Please try again.")]
    ResolutionFailed(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// 인증 프로바이더 어댑터 에러
///
/// 리졸버는 이 에러를 상위로 전파하지 않습니다. "토큰이 없음"(`Ok(None)`)과
/// "토큰이 있었지만 실패함"(`Err(ProviderError)`)을 로그에서 구분하기 위해서만 존재합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// 필수 설정값 누락 (공개키, API 키 등)
    #[error("provider is not configured: {0}")]
    MissingConfiguration(String),

    /// 토큰/세션이 유효하지 않거나 만료됨
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// 프로바이더 API 호출 실패 (네트워크, 5xx)
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// 응답 본문 파싱 실패 또는 필수 필드 누락
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// 사용자 저장소 에러
///
/// 저장소 읽기/쓰기 실패는 절대 삼키지 않습니다. 리졸버는 부분적으로 만들어진
/// 사용자를 반환하는 대신 이 에러로 중단합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),

    #[error("cache error: {0}")]
    Cache(String),

    /// 프로바이더 ID 유니크 제약 위반
    ///
    /// 같은 외부 신원으로 동시에 들어온 다른 요청이 먼저 사용자를 생성한 경우입니다.
    #[error("duplicate identity for {field}: {value}")]
    DuplicateIdentity { field: String, value: String },

    #[error("user not found: {0}")]
    NotFound(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)),
            RepositoryError::Cache(msg) => AppError::RedisError(msg),
            duplicate @ RepositoryError::DuplicateIdentity { .. } => AppError::ConflictError(duplicate.to_string()),
            RepositoryError::Database(msg) => AppError::DatabaseError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("resource id is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_resolution_failed_hides_detail() {
        let error = AppError::ResolutionFailed("E11000 duplicate key error collection: users".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.to_string().contains("E11000"));
        assert!(error.to_string().contains("try again"));
    }

    #[test]
    fn test_repository_error_conversion() {
        let not_found: AppError = RepositoryError::NotFound("abc".to_string()).into();
        assert!(matches!(not_found, AppError::NotFound(_)));

        let duplicate: AppError = RepositoryError::DuplicateIdentity {
            field: "app_user_id".to_string(),
            value: "pA-1".to_string(),
        }.into();
        assert!(matches!(duplicate, AppError::ConflictError(ref msg) if msg.contains("app_user_id")));
        assert_eq!(duplicate.error_response().status(), actix_web::http::StatusCode::CONFLICT);

        let cache: AppError = RepositoryError::Cache("timeout".to_string()).into();
        assert!(matches!(cache, AppError::RedisError(_)));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
