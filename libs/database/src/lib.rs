//! Database connectivity for the taskboard services.
//!
//! Wraps SeaORM connection setup for PostgreSQL with environment-driven pool
//! configuration, connection retry with exponential backoff, migration
//! running and a readiness probe.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "taskboard_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::DatabaseError;
