//! Manual migration runner for the tasks schema.
//!
//! Reads `DATABASE_URL` and accepts the usual sea-orm-migration subcommands,
//! e.g. `migration up`, `migration down -n 1`, `migration status`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
