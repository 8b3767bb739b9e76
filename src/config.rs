use shuttle_runtime::SecretStore;
use tracing::error;

/// Identity provider (Auth0 tenant) settings. All three credentials must be
/// present for login to work; the site runs with the suggestion gate locked
/// when any is missing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public base URL of the site, used by sitemap/robots and redirects.
    pub base_url: String,
    /// GitHub REST API root. Overridable so tests can point it at a mock.
    pub github_api_base: String,
    /// Organization whose public members form the team directory.
    pub github_org: String,
    /// Bearer credential for the GitHub REST API. Requests go out
    /// unauthenticated when absent.
    pub github_token: Option<String>,
    /// "owner/repo" receiving tool suggestion issues.
    pub suggestions_repo: String,
    pub session_jwt_secret: String,
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        let base_url = secrets
            .get("BASE_URL")
            .unwrap_or_else(|| "https://clitools.dev".to_string());

        let auth = match (
            secrets.get("AUTH0_DOMAIN"),
            secrets.get("AUTH0_CLIENT_ID"),
            secrets.get("AUTH0_CLIENT_SECRET"),
        ) {
            (Some(domain), Some(client_id), Some(client_secret)) => Some(AuthConfig {
                domain,
                client_id,
                client_secret,
                callback_url: secrets
                    .get("AUTH0_CALLBACK_URL")
                    .unwrap_or_else(|| format!("{base_url}/auth/callback")),
            }),
            _ => {
                error!(
                    "Auth0 secrets (AUTH0_DOMAIN, AUTH0_CLIENT_ID, AUTH0_CLIENT_SECRET) \
                     are not set; login is disabled"
                );
                None
            }
        };

        Self {
            github_api_base: secrets
                .get("GITHUB_API_BASE")
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            github_org: secrets
                .get("GITHUB_ORG")
                .unwrap_or_else(|| "clitools-dev".to_string()),
            github_token: secrets.get("GITHUB_TOKEN"),
            suggestions_repo: secrets
                .get("SUGGESTIONS_REPO")
                .unwrap_or_else(|| "clitools-dev/clitools_data".to_string()),
            session_jwt_secret: secrets
                .get("SESSION_JWT_SECRET")
                .unwrap_or_else(|| "SESSION_SECRET".to_string()),
            auth,
            base_url,
        }
    }
}
