use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::{request::Parts, StatusCode};
use cookie::Cookie;

use super::models::UserProfile;
use super::session;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_STATE_COOKIE: &str = "login_state";

/// A request carrying a verified session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub profile: UserProfile,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let State(app): State<AppState> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Failed to extract state"))?;

        let cookies = parts
            .headers
            .get("cookie")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");
        let token = cookie_value(cookies, SESSION_COOKIE)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing session cookie"))?;
        let profile = session::verify_session(&token, &app.config.session_jwt_secret)
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired session token"))?;

        Ok(AuthenticatedUser { profile })
    }
}

/// Pull one cookie's value out of a `Cookie:` header.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for cookie_str in cookies.split(';') {
        if let Ok(cookie) = Cookie::parse(cookie_str.trim()) {
            if cookie.name() == name {
                return Some(cookie.value().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_the_named_cookie() {
        let header = "theme=dark; session=abc.def.ghi; other=1";
        assert_eq!(cookie_value(header, "session").as_deref(), Some("abc.def.ghi"));
        assert_eq!(cookie_value(header, "theme").as_deref(), Some("dark"));
        assert!(cookie_value(header, "login_state").is_none());
        assert!(cookie_value("", "session").is_none());
    }
}
