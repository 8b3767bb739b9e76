use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod auth;
pub mod catalog;
pub mod config;
pub mod site;
pub mod suggest;
pub mod team;

use auth::provider::{Auth0Provider, IdentityProvider};
use config::AppConfig;
use team::GithubClient;

/// Shared application state passed to all route handlers. Immutable after
/// startup; no state crosses request boundaries.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub github: GithubClient,
    /// `None` when the identity provider is unconfigured; the suggestion
    /// gate stays locked in that case.
    pub provider: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let github = GithubClient::new(&config);
        let provider: Option<Arc<dyn IdentityProvider>> =
            Auth0Provider::from_config(&config).map(|p| Arc::new(p) as _);
        Self {
            config: Arc::new(config),
            github,
            provider,
        }
    }
}

/// Build the axum Router with all API routes and middleware.
/// Used by the Shuttle entrypoint and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Team directory (About page)
        .route("/api/team", get(team::get_team))
        // Tool suggestions
        .route("/api/categories", get(suggest::list_categories))
        .route("/api/suggest", post(suggest::suggest_tool))
        // Identity lifecycle (delegated to the external provider)
        .route("/auth/login", get(auth::handlers::login))
        .route("/auth/callback", get(auth::handlers::callback))
        .route("/auth/logout", get(auth::handlers::logout))
        .route("/auth/me", get(auth::handlers::me))
        .route("/auth/session", get(auth::handlers::session_status))
        // Crawler artifacts
        .route("/sitemap.xml", get(site::sitemap))
        .route("/robots.txt", get(site::robots))
        .layer(cors)
        .with_state(state)
}
