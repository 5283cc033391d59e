//! Show command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::fetcher::Fetcher;

/// Fetch both source lists once and print every range.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let fetcher = Fetcher::new(config.timeout()?)?;

    let v4 = fetcher.fetch(&config.sources.ipv4).await?;
    let v6 = fetcher.fetch(&config.sources.ipv6).await?;

    for prefix in v4.iter().chain(v6.iter()) {
        println!("{prefix}");
    }
    println!();
    println!(
        "{} ranges ({} IPv4, {} IPv6)",
        v4.len() + v6.len(),
        v4.len(),
        v6.len()
    );

    Ok(())
}
