use std::collections::HashMap;
use actix_web::HttpRequest;
use crate::config::SessionCookieConfig;

/// 프로바이더 어댑터에 넘기는 요청 스냅샷 (헤더 + 쿠키)
///
/// 어댑터가 actix 타입에 묶이지 않도록 필요한 값만 복사해 둡니다.
/// 헤더 이름은 소문자로 저장하고 조회합니다.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        let headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let cookies = match req.cookies() {
            Ok(cookies) => cookies
                .iter()
                .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
                .collect(),
            Err(e) => {
                log::debug!("쿠키 파싱 실패, 쿠키 없이 진행: {}", e);
                HashMap::new()
            }
        };

        Self { headers, cookies }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// 로그아웃 쿠키가 정확히 `"true"`이면 로그아웃 상태입니다.
    pub fn is_logged_out(&self) -> bool {
        self.cookie(&SessionCookieConfig::logout_cookie_name())
            .map(SessionCookieConfig::is_logged_out_value)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_from_request_collects_headers_and_cookies() {
        let req = TestRequest::default()
            .insert_header(("X-App-User-Token", "token-abc"))
            .cookie(Cookie::new("sb-access-token", "session-xyz"))
            .to_http_request();

        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.header("x-app-user-token"), Some("token-abc"));
        assert_eq!(ctx.header("X-APP-USER-TOKEN"), Some("token-abc"));
        assert_eq!(ctx.cookie("sb-access-token"), Some("session-xyz"));
        assert_eq!(ctx.cookie("missing"), None);
    }

    #[test]
    fn test_logout_flag_requires_exact_true() {
        let name = SessionCookieConfig::logout_cookie_name();

        assert!(RequestContext::new().with_cookie(&name, "true").is_logged_out());
        assert!(!RequestContext::new().with_cookie(&name, "false").is_logged_out());
        assert!(!RequestContext::new().is_logged_out());
    }
}
