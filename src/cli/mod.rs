//! CLI module for Nameguard
//!
//! - `serve`: HTTP API server
//! - `check`: run one display name through the validator
//! - `migrate`: apply or revert PostgreSQL schema migrations

pub mod check;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Nameguard - homoglyph-resistant username fingerprints
#[derive(Parser)]
#[command(name = "nameguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Validate a display name and show its fingerprint
    Check(check::CheckArgs),

    /// Manage the PostgreSQL schema
    Migrate(migrate::MigrateArgs),
}
