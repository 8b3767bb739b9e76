use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::models::{LoginStateClaims, SessionClaims, UserProfile};

const SESSION_TTL_HOURS: i64 = 24;
/// A login state only has to survive one provider round trip.
const LOGIN_STATE_TTL_MINUTES: i64 = 10;

pub fn mint_session(
    profile: &UserProfile,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: profile.sub.clone(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        picture: profile.picture.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Decode and validate a session token; `None` for anything invalid or
/// expired.
pub fn verify_session(token: &str, secret: &str) -> Option<UserProfile> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .ok()?;
    Some(UserProfile {
        sub: data.claims.sub,
        email: data.claims.email,
        name: data.claims.name,
        picture: data.claims.picture,
    })
}

/// Fresh login state: a state nonce, a PKCE code verifier, and the page to
/// return to once the provider calls back.
pub fn new_login_state(return_to: &str) -> LoginStateClaims {
    LoginStateClaims {
        state: Uuid::new_v4().to_string(),
        verifier: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        return_to: return_to.to_string(),
        exp: (Utc::now() + Duration::minutes(LOGIN_STATE_TTL_MINUTES)).timestamp() as usize,
    }
}

pub fn encode_login_state(
    claims: &LoginStateClaims,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn decode_login_state(token: &str, secret: &str) -> Option<LoginStateClaims> {
    decode::<LoginStateClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// S256 challenge for a PKCE code verifier.
pub fn pkce_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}
