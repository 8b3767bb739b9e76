use shuttle_runtime::SecretStore;

use clitools_site::{build_router, config::AppConfig, AppState};

#[shuttle_runtime::main]
async fn main(#[shuttle_runtime::Secrets] secrets: SecretStore) -> shuttle_axum::ShuttleAxum {
    let config = AppConfig::from_secrets(&secrets);
    let router = build_router(AppState::new(config));

    Ok(router.into())
}
