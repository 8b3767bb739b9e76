use serde::{Deserialize, Serialize};

/// Profile claims reported by the identity provider for a verified login.
/// Never persisted; lives only inside the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// JWT claims carried in the `session` cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// JWT claims carried in the short-lived `login_state` cookie between the
/// login redirect and the provider callback.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginStateClaims {
    /// Random nonce the provider must echo back in the `state` parameter.
    pub state: String,
    /// PKCE code verifier for the token exchange.
    pub verifier: String,
    /// Path to land on after login completes.
    pub return_to: String,
    pub exp: usize,
}

/// Session resolution as reported by `GET /auth/session`. The transitions
/// are driven entirely by the external provider's callback; this system
/// only reads the result.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated { user: UserProfile },
}

impl SessionStatus {
    /// The suggestion-form gate: only a verified session may open the
    /// composer.
    pub fn can_suggest(&self) -> bool {
        matches!(self, SessionStatus::Authenticated { .. })
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthCallbackQuery {
    pub code: String,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogoutQuery {
    #[serde(default)]
    pub return_to: Option<String>,
}
