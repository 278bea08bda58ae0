use clap::Parser;
use nameguard::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Check(args) => cli::check::run(args),
        Command::Migrate(args) => cli::migrate::run(args).await,
    }
}
