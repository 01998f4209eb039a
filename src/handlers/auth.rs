//! Authentication HTTP Handlers
//!
//! - `GET /api/v1/auth/session` - 현재 요청의 신원 확인
//! - `POST /api/v1/auth/logout` - 로그아웃 플래그 설정, 웹 세션 쿠키 만료
//!
//! 로그아웃 플래그는 App 토큰 인증만 막습니다. 웹 세션은 쿠키를 지워야 끝납니다.
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{get, post, HttpRequest, HttpResponse};
use serde_json::json;
use crate::config::{SessionCookieConfig, WebSessionConfig};
use crate::domain::dto::sessions::SessionResponse;
use crate::domain::models::auth::RequestContext;
use crate::domain::models::identity::Resolution;
use crate::errors::errors::AppError;
use crate::middlewares::unauthenticated_response;
use crate::services::auth::IdentityService;
use crate::services::users::UserService;

/// 세션 확인 핸들러
///
/// 두 프로바이더로 요청을 확인하고, 필요하면 사용자를 만들거나 연결합니다.
///
/// # Endpoint
/// `GET /auth/session`
///
/// # Responses
/// - `200` - 사용자, 인증 프로바이더, 일치한 전략, 기본 프로필
/// - `401` - 자격 증명 없음 (`authentication_required`)
/// - `500` - 저장소 실패 (재시도 안내)
#[get("/session")]
pub async fn get_session(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let context = RequestContext::from_request(&req);

    match IdentityService::instance().authenticate(&context).await? {
        Resolution::Authenticated(session) => {
            let profile = UserService::instance()
                .find_profile(&session.user_id())
                .await
                .map_err(session_failure)?;
            Ok(HttpResponse::Ok().json(SessionResponse::from(session).with_profile(profile)))
        }
        Resolution::Unauthenticated => Ok(unauthenticated_response()),
    }
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    let mut response = HttpResponse::Ok();
    for cookie in logout_cookies() {
        response.cookie(cookie);
    }

    log::debug!("로그아웃 쿠키 설정");
    response.json(json!({ "logged_out": true }))
}

/// 세션 확인 도중의 실패는 상세 원인을 숨기고 재시도 안내로 응답합니다.
fn session_failure(err: AppError) -> AppError {
    match err {
        AppError::ResolutionFailed(_) => err,
        other => {
            log::error!("세션 프로필 조회 실패: {}", other);
            AppError::ResolutionFailed(other.to_string())
        }
    }
}

fn logout_cookies() -> Vec<Cookie<'static>> {
    let mut flag = Cookie::new(SessionCookieConfig::logout_cookie_name(), "true");
    flag.set_path("/");
    flag.set_max_age(Duration::days(1));
    flag.set_same_site(SameSite::Lax);

    let mut session = Cookie::new(WebSessionConfig::session_cookie(), "");
    session.set_path("/");
    session.make_removal();

    vec![flag, session]
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App, ResponseError};
    use actix_web::http::StatusCode;

    #[test]
    fn test_logout_cookies() {
        let cookies = logout_cookies();

        let flag = cookies.iter().find(|c| c.name() == SessionCookieConfig::logout_cookie_name()).unwrap();
        assert!(SessionCookieConfig::is_logged_out_value(flag.value()));
        assert_eq!(flag.max_age(), Some(Duration::days(1)));

        let session = cookies.iter().find(|c| c.name() == WebSessionConfig::session_cookie()).unwrap();
        assert_eq!(session.value(), "");
        assert!(session.max_age().is_some_and(|age| age.is_zero()));
    }

    #[actix_web::test]
    async fn test_logout_sets_flag_cookie() {
        let app = actix_test::init_service(App::new().service(logout)).await;
        let req = actix_test::TestRequest::post().uri("/logout").to_request();

        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let flag_name = SessionCookieConfig::logout_cookie_name();
        assert!(resp.response().cookies().any(|c| c.name() == flag_name && c.value() == "true"));
    }

    #[test]
    fn test_session_failure_hides_repository_detail() {
        let err = session_failure(AppError::InternalError("프로필 조회 실패: database error: E11000".to_string()));

        assert!(matches!(err, AppError::ResolutionFailed(_)));
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("E11000"));
    }
}
