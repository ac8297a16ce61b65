use std::path::PathBuf;

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Signing key file. Env var: `JWT_KEY_PATH`.
    pub jwt_key_path: PathBuf,
    /// Keep the key read at startup instead of re-reading it per call. Env var: `JWT_KEY_CACHE`.
    pub jwt_key_cache: bool,
    /// bcrypt work factor. Env var: `BCRYPT_COST`.
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            jwt_key_path: std::env::var("JWT_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("jwtRS256.key")),
            jwt_key_cache: std::env::var("JWT_KEY_CACHE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
