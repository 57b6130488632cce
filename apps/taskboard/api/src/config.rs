use axum::http::HeaderValue;
use axum_helpers::{JwtConfig, parse_allowed_origins};
use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Everything the server reads from the environment at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` when `DATABASE_URL` is unset; tasks are then kept in memory
    pub database: Option<PostgresConfig>,
    /// Public base URL handed to the browser as `window.APP_URL`
    pub app_url: String,
    pub allowed_origins: Vec<HeaderValue>,
    pub jwt: JwtConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let database = PostgresConfig::from_env_if_configured()?;
        let jwt = JwtConfig::from_env()?; // Required

        let app_url = env_optional("APP_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| server.local_url());

        let origins = env_optional("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| app_url.clone());
        let allowed_origins = parse_allowed_origins(&origins)
            .map_err(|e| eyre::eyre!("Invalid CORS_ALLOWED_ORIGIN value: {}", e))?;
        if allowed_origins.is_empty() {
            eyre::bail!("CORS_ALLOWED_ORIGIN cannot be empty");
        }

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            app_url,
            allowed_origins,
            jwt,
        })
    }
}
