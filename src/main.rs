//! rangewatch - trusted proxy IP ranges, fetched and refreshed from a provider.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rangewatch::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run => rangewatch::commands::run::run(&cli.config).await,
        Commands::Show => rangewatch::commands::show::run(&cli.config).await,
        Commands::Check { ip } => rangewatch::commands::check::run(&ip, &cli.config).await,
        Commands::Version => {
            println!("rangewatch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
