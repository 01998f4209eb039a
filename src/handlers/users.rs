//! 인증된 사용자 HTTP 핸들러
//!
//! - `GET /api/v1/me` - 정규 사용자와 기본 프로필 (필수 인증)
//! - `GET /api/v1/access/{resource_id}` - App 리소스 접근 권한 (필수 인증)
//! - `GET /api/v1/whoami` - 로그인 여부 (선택 인증)
use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::errors::errors::AppError;
use crate::services::users::UserService;

/// 현재 사용자 조회 핸들러
///
/// # 응답 (200 OK)
/// ```json
/// {
///   "user": {
///     "id": "507f1f77bcf86cd799439011",
///     "app_user_id": "user_123",
///     "web_user_id": null,
///     "email": null,
///     "username": "creatorX",
///     "is_linked": false
///   },
///   "profile": { "hourly_rate": 0.0, "is_active": true }
/// }
/// ```
#[get("")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let me = service.get_me(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(me))
}

/// 리소스 접근 권한 확인 핸들러
///
/// 확인에 실패해도 오류 대신 `has_access: false`로 응답합니다.
#[get("/{resource_id}")]
pub async fn check_access(
    user: AuthenticatedUser,
    resource_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let access = service.check_access(&user, &resource_id).await?;

    Ok(HttpResponse::Ok().json(access))
}

/// 로그인 여부 확인 핸들러
///
/// 미인증이어도 200으로 `authenticated: false`를 돌려줍니다.
#[get("")]
pub async fn whoami(user: OptionalUser) -> HttpResponse {
    match user.0 {
        Some(user) => HttpResponse::Ok().json(json!({
            "authenticated": true,
            "user_id": user.user_id,
            "provider": user.auth_provider,
            "is_linked": user.is_linked(),
        })),
        None => HttpResponse::Ok().json(json!({ "authenticated": false })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpMessage};
    use actix_web::dev::Service;
    use crate::config::AuthProvider;

    #[actix_web::test]
    async fn test_whoami_without_user() {
        let app = test::init_service(App::new().service(web::scope("/whoami").service(whoami))).await;
        let req = test::TestRequest::get().uri("/whoami").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["authenticated"], false);
    }

    #[actix_web::test]
    async fn test_whoami_with_user() {
        let app = test::init_service(App::new().service(web::scope("/whoami").service(whoami))).await;
        let req = test::TestRequest::get().uri("/whoami").to_request();
        req.extensions_mut().insert(AuthenticatedUser {
            user_id: "65f0c0ffee0000000000beef".to_string(),
            auth_provider: AuthProvider::App,
            provider_user_id: "pA-1".to_string(),
            app_user_id: Some("pA-1".to_string()),
            web_user_id: None,
        });

        let resp = app.call(req).await.unwrap();
        let body: serde_json::Value = test::read_body_json(resp).await;

        assert_eq!(body["authenticated"], true);
        assert_eq!(body["provider"], "app");
        assert_eq!(body["is_linked"], false);
    }
}
