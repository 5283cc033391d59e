//! Check command implementation.

use anyhow::Result;
use std::net::IpAddr;
use std::path::Path;

use crate::config::Config;
use crate::fetcher::Fetcher;

/// Fetch once and report whether an address is inside any range.
pub async fn run(ip_str: &str, config_path: &Path) -> Result<()> {
    let ip: IpAddr = ip_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid IP address: {}", ip_str))?;

    let config = Config::load_or_default(config_path)?;
    let fetcher = Fetcher::new(config.timeout()?)?;

    let mut ranges = fetcher.fetch(&config.sources.ipv4).await?;
    ranges.extend(fetcher.fetch(&config.sources.ipv6).await?);

    match ranges.iter().find(|net| net.contains(&ip)) {
        Some(net) => println!("{} is a known proxy address (matches {})", ip, net),
        None => println!("{} is not in the provider's ranges", ip),
    }

    Ok(())
}
