//! Shared application state passed to every router builder.

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;

/// Cloned into each router (the connection pool and keys are reference counted)
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when running with the in-memory task store
    pub db: Option<DatabaseConnection>,
    pub jwt: JwtAuth,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: Option<DatabaseConnection>) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        Self { config, db, jwt }
    }
}
