//! Migration CLI tool.
//!
//! `cli::run_cli` installs its own tracing subscriber (honouring `--verbose`),
//! so none is set up here.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(migration::Migrator).await;
}
