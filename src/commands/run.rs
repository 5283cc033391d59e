//! Run command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cache::RangeCache;
use crate::config::Config;
use crate::shutdown;

/// Start the cache and keep it refreshed until SIGINT/SIGTERM.
///
/// A failed initial fetch aborts startup; once running, failed
/// refreshes only log and the last good ranges stay served.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    let cache = Arc::new(
        RangeCache::initialize(&config)
            .await
            .context("initial range fetch failed")?,
    );

    let (handle, token) = shutdown::channel();
    shutdown::listen_for_signals(handle);

    info!(interval = %config.interval, "rangewatch running");
    let refresh = cache.spawn_refresh(token);
    refresh.await.context("refresh task panicked")?;

    info!(
        count = cache.current_ranges().len(),
        "stopped; last published set retained until exit"
    );
    Ok(())
}
