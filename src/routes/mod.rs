//! API 라우트 설정 모듈
//!
//! # Routes
//!
//! | Method | Path | 인증 |
//! |--------|------|------|
//! | GET | `/health` | - |
//! | GET | `/api/v1/auth/session` | 핸들러에서 직접 확인 |
//! | POST | `/api/v1/auth/logout` | - |
//! | GET | `/api/v1/me` | `DualAuthMiddleware::required()` |
//! | GET | `/api/v1/access/{resource_id}` | `DualAuthMiddleware::required()` |
//! | GET | `/api/v1/whoami` | `DualAuthMiddleware::optional()` |
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::DualAuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

/// 세션 확인과 로그아웃
///
/// 세션 확인은 미인증도 정상 응답(401 본문)이므로 미들웨어 없이 등록합니다.
///
/// ```bash
/// # 앱 내장 토큰
/// curl http://localhost:8080/api/v1/auth/session \
///   -H "x-app-user-token: eyJhbGciOiJFUzI1NiIs..."
///
/// # 웹 세션 쿠키
/// curl http://localhost:8080/api/v1/auth/session \
///   --cookie "sb-access-token=eyJhbGciOiJIUzI1NiIs..."
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::get_session)
            .service(handlers::auth::logout)
    );
}

/// 인증이 필요한 사용자 라우트
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(DualAuthMiddleware::required())
            .service(handlers::users::get_me)
    );

    cfg.service(
        web::scope("/api/v1/access")
            .wrap(DualAuthMiddleware::required())
            .service(handlers::users::check_access)
    );

    cfg.service(
        web::scope("/api/v1/whoami")
            .wrap(DualAuthMiddleware::optional())
            .service(handlers::users::whoami)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "dual_auth_backend",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "dependency_injection": "Singleton Macro",
///     "identity_providers": ["app", "web"]
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "dual_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro",
            "identity_providers": ["app", "web"]
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "dual_auth_backend");
    }
}
