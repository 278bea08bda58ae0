//! Migrate command - manages the PostgreSQL schema

use clap::Args;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresConfig, PostgresMigrator};

/// Arguments for the migrate command
#[derive(Args, Clone)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// Print the current schema version and exit
    #[arg(long)]
    pub status: bool,
}

/// Run the migrate command
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    if config.storage.backend != StorageBackend::Postgres {
        anyhow::bail!("migrate requires storage.backend = \"postgres\"");
    }

    let pool = connect_pool(&PostgresConfig::from(&config.storage)).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.status {
        match migrator.version().await? {
            Some(version) => println!("schema version: {}", version),
            None => println!("schema version: none"),
        }
    } else if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = migrator.run().await?;
        info!(applied, "Migrations complete");
    }

    Ok(())
}
