use axum::Router;
use domain_tasks::{InMemoryTaskRepository, PgTaskRepository, TaskService, handlers};

use crate::state::AppState;

/// Task routes on PostgreSQL when a pool is configured, in memory otherwise
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(TaskService::new(PgTaskRepository::new(db.clone()))),
        None => handlers::router(TaskService::new(InMemoryTaskRepository::new())),
    }
}
