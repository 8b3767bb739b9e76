use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use thiserror::Error;

use super::models::UserProfile;
use crate::config::{AppConfig, AuthConfig};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to contact the identity provider: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange failed: {0}")]
    Exchange(String),

    #[error("invalid id_token: {0}")]
    InvalidToken(String),
}

/// Narrow seam over the external identity vendor. Handlers only ever see
/// authorize/logout URLs and verified profile claims, so the concrete
/// vendor can be swapped without touching them.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Login-redirect target for the given state nonce and PKCE challenge.
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String;

    /// Exchange an authorization code for verified profile claims.
    async fn exchange_code(&self, code: &str, verifier: &str)
        -> Result<UserProfile, ProviderError>;

    /// Logout-redirect target that lands back on `return_to`.
    fn logout_url(&self, return_to: &str) -> String;
}

/// Auth0 implementation of the provider seam.
pub struct Auth0Provider {
    http: reqwest::Client,
    domain: String,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

#[derive(Debug, serde::Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl Auth0Provider {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            domain: auth.domain.clone(),
            client_id: auth.client_id.clone(),
            client_secret: auth.client_secret.clone(),
            callback_url: auth.callback_url.clone(),
        }
    }

    /// `None` when the Auth0 settings are absent from the configuration.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.auth.as_ref().map(Self::new)
    }

    async fn fetch_jwks(&self) -> Result<Value, reqwest::Error> {
        let jwks_url = format!("https://{}/.well-known/jwks.json", self.domain);
        self.http.get(&jwks_url).send().await?.json().await
    }

    /// Validate the RS256 signature of `id_token` against the tenant JWKS
    /// and return its profile claims.
    async fn verify_id_token(&self, id_token: &str) -> Result<UserProfile, ProviderError> {
        let header = decode_header(id_token)
            .map_err(|e| ProviderError::InvalidToken(format!("bad header: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| ProviderError::InvalidToken("no kid in id_token header".into()))?;

        let jwks = self.fetch_jwks().await?;
        let empty_keys: Vec<Value> = Vec::new();
        let keys = jwks
            .get("keys")
            .and_then(|v| v.as_array())
            .unwrap_or(&empty_keys);
        let jwk = keys
            .iter()
            .find(|k| k.get("kid") == Some(&Value::String(kid.clone())))
            .ok_or_else(|| ProviderError::InvalidToken("no matching JWK".into()))?;

        let n = jwk.get("n").and_then(|v| v.as_str()).unwrap_or("");
        let e = jwk.get("e").and_then(|v| v.as_str()).unwrap_or("");
        let decoding_key = DecodingKey::from_rsa_components(n, e)
            .map_err(|e| ProviderError::InvalidToken(format!("bad JWK components: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&[format!("https://{}/", self.domain)]);

        let data = decode::<IdTokenClaims>(id_token, &decoding_key, &validation)
            .map_err(|e| ProviderError::InvalidToken(format!("signature check failed: {e}")))?;

        Ok(UserProfile {
            sub: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
            picture: data.claims.picture,
        })
    }
}

#[async_trait]
impl IdentityProvider for Auth0Provider {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String {
        format!(
            "https://{}/authorize?response_type=code&client_id={}&redirect_uri={}&scope=openid%20profile%20email&state={}&code_challenge={}&code_challenge_method=S256",
            self.domain,
            self.client_id,
            urlencoding::encode(&self.callback_url),
            state,
            code_challenge,
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<UserProfile, ProviderError> {
        let token_url = format!("https://{}/oauth/token", self.domain);
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("client_id", self.client_id.as_str());
        params.insert("client_secret", self.client_secret.as_str());
        params.insert("code", code);
        params.insert("redirect_uri", self.callback_url.as_str());
        params.insert("code_verifier", verifier);

        let response = self.http.post(&token_url).form(&params).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Exchange(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }
        let token_json: Value = response.json().await?;
        let id_token = token_json
            .get("id_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::Exchange("no id_token in response".into()))?;

        self.verify_id_token(id_token).await
    }

    fn logout_url(&self, return_to: &str) -> String {
        format!(
            "https://{}/v2/logout?client_id={}&returnTo={}",
            self.domain,
            self.client_id,
            urlencoding::encode(return_to),
        )
    }
}
