use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use super::middleware::{cookie_value, AuthenticatedUser, LOGIN_STATE_COOKIE, SESSION_COOKIE};
use super::models::{AuthCallbackQuery, LoginQuery, LogoutQuery, SessionStatus};
use super::session;
use crate::AppState;

const SESSION_COOKIE_MAX_AGE_SECS: u32 = 86400;
const LOGIN_STATE_COOKIE_MAX_AGE_SECS: u32 = 600;

/// Only same-site paths may be used as a post-login landing page.
fn sanitize_return_to(raw: Option<String>) -> String {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/".to_string(),
    }
}

fn set_cookie(name: &str, value: &str, max_age_secs: u32) -> String {
    format!("{name}={value}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

fn clear_cookie(name: &str) -> String {
    set_cookie(name, "", 0)
}

/// GET /auth/login. Starts the provider login round trip. The state nonce,
/// PKCE verifier, and return path travel in a signed short-lived cookie.
pub async fn login(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Response {
    let Some(provider) = state.provider.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Login is not configured").into_response();
    };

    let login_state = session::new_login_state(&sanitize_return_to(query.return_to));
    let token = match session::encode_login_state(&login_state, &state.config.session_jwt_secret) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to encode login state: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to start login").into_response();
        }
    };

    let challenge = session::pkce_challenge(&login_state.verifier);
    let auth_url = provider.authorize_url(&login_state.state, &challenge);

    info!("Redirecting to identity provider login");
    (
        [(
            header::SET_COOKIE,
            set_cookie(LOGIN_STATE_COOKIE, &token, LOGIN_STATE_COOKIE_MAX_AGE_SECS),
        )],
        Redirect::temporary(&auth_url),
    )
        .into_response()
}

/// GET /auth/callback. Finishes the provider round trip: verify the state
/// nonce, exchange the code for verified claims, and set the session cookie.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<AuthCallbackQuery>,
    headers: HeaderMap,
) -> Response {
    let Some(provider) = state.provider.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Login is not configured").into_response();
    };

    let cookies = headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let Some(login_token) = cookie_value(cookies, LOGIN_STATE_COOKIE) else {
        return (StatusCode::BAD_REQUEST, "Missing login state cookie").into_response();
    };
    let Some(login_state) =
        session::decode_login_state(&login_token, &state.config.session_jwt_secret)
    else {
        return (StatusCode::BAD_REQUEST, "Invalid or expired login state").into_response();
    };
    if query.state.as_deref() != Some(login_state.state.as_str()) {
        return (StatusCode::BAD_REQUEST, "State mismatch in callback").into_response();
    }

    let profile = match provider
        .exchange_code(&query.code, &login_state.verifier)
        .await
    {
        Ok(profile) => profile,
        Err(e) => {
            error!("Identity provider exchange failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "Identity provider exchange failed").into_response();
        }
    };

    let session_token = match session::mint_session(&profile, &state.config.session_jwt_secret) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to mint session token: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    info!("Login completed for {}", profile.sub);

    Response::builder()
        .status(StatusCode::FOUND)
        .header(
            header::SET_COOKIE,
            set_cookie(SESSION_COOKIE, &session_token, SESSION_COOKIE_MAX_AGE_SECS),
        )
        .header(header::SET_COOKIE, clear_cookie(LOGIN_STATE_COOKIE))
        .header(header::LOCATION, login_state.return_to)
        .body(axum::body::Body::empty())
        .unwrap()
}

/// GET /auth/logout. Clears the session and sends the user through the
/// provider's logout redirect (straight home when login is unconfigured).
pub async fn logout(State(state): State<AppState>, Query(query): Query<LogoutQuery>) -> Response {
    let return_to = format!(
        "{}{}",
        state.config.base_url,
        sanitize_return_to(query.return_to)
    );
    let location = match &state.provider {
        Some(provider) => provider.logout_url(&return_to),
        None => return_to,
    };

    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::SET_COOKIE, clear_cookie(SESSION_COOKIE))
        .header(header::LOCATION, location)
        .body(axum::body::Body::empty())
        .unwrap()
}

/// GET /auth/me. The verified session's profile claims.
pub async fn me(AuthenticatedUser { profile }: AuthenticatedUser) -> impl IntoResponse {
    Json(profile)
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    status: SessionStatus,
    can_suggest: bool,
}

/// GET /auth/session. The suggestion gate. Reports whether a verified
/// identity is present; never fails.
pub async fn session_status(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let status = cookie_value(cookies, SESSION_COOKIE)
        .and_then(|token| session::verify_session(&token, &state.config.session_jwt_secret))
        .map(|user| SessionStatus::Authenticated { user })
        .unwrap_or(SessionStatus::Unauthenticated);

    let can_suggest = status.can_suggest();
    Json(SessionResponse {
        status,
        can_suggest,
    })
}
