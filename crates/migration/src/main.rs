use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

/// Apply or inspect the schema of the Tally key-value store.
#[derive(Parser, Debug)]
#[command(name = "migration")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./tally.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Option<Step>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Step {
    /// Apply pending migrations (default).
    Up,
    /// Roll back the last migration.
    Down,
    /// Drop everything and re-apply all migrations.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Step::Up) {
        Step::Up => migration::Migrator::up(&db, None).await?,
        Step::Down => migration::Migrator::down(&db, Some(1)).await?,
        Step::Fresh => migration::Migrator::fresh(&db).await?,
        Step::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
