use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use rmuse_api::config::ApiConfig;
use rmuse_api::domain::credential::Credentials;
use rmuse_api::router::build_router;
use rmuse_api::state::AppState;
use rmuse_auth_types::key::KeySource;

#[tokio::main]
async fn main() {
    rmuse_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // A missing or empty key file stops startup in both modes.
    let keys = KeySource::file(&config.jwt_key_path);
    let keys = if config.jwt_key_cache {
        keys.preload().await.expect("failed to read signing key")
    } else {
        keys.load().await.expect("failed to read signing key");
        keys
    };

    let credentials = Credentials::new(config.bcrypt_cost).expect("invalid BCRYPT_COST");
    info!(
        key_path = %config.jwt_key_path.display(),
        key_cached = config.jwt_key_cache,
        bcrypt_cost = credentials.cost(),
        "signing key and hasher ready"
    );

    let state = AppState {
        db,
        keys,
        credentials: Arc::new(credentials),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
