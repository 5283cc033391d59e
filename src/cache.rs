//! Self-refreshing cache of trusted proxy address ranges.
//!
//! The cache fetches the provider's IPv4 and IPv6 lists once at
//! initialization, publishes them as a single range set, and keeps a
//! background loop replacing that set on a fixed interval. Readers
//! always see a whole set: either the initial one or some later fully
//! fetched replacement, never a mix.

use ipnet::IpNet;
use std::net::IpAddr;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::RangewatchError;
use crate::fetcher::Fetcher;
use crate::shutdown::ShutdownToken;

/// Read access to the currently published range set.
///
/// The host's trust-decision logic consumes this seam per request; it
/// never sees the cache or its refresh machinery.
pub trait RangeSource: Send + Sync {
    /// The live range set: the IPv4 list followed by the IPv6 list,
    /// in source order. Order carries no meaning for membership.
    fn current_ranges(&self) -> Arc<[IpNet]>;

    /// Whether `ip` falls inside any live range.
    fn is_trusted(&self, ip: IpAddr) -> bool {
        range_set_contains(&self.current_ranges(), ip)
    }
}

/// Order-independent membership test over a range set.
pub fn range_set_contains(ranges: &[IpNet], ip: IpAddr) -> bool {
    ranges.iter().any(|net| match (net, ip) {
        (IpNet::V4(net), IpAddr::V4(ip)) => net.contains(&ip),
        (IpNet::V6(net), IpAddr::V6(ip)) => net.contains(&ip),
        _ => false,
    })
}

/// The cache proper. Wrap in an [`Arc`] to share with the refresh
/// task and request handlers.
#[derive(Debug)]
pub struct RangeCache {
    ranges: RwLock<Arc<[IpNet]>>,
    fetcher: Fetcher,
    ipv4_url: String,
    ipv6_url: String,
    interval: Duration,
}

impl RangeCache {
    /// Fetch both sources and publish the initial range set.
    ///
    /// Fails fast: either source failing, or both succeeding with
    /// nothing in them, leaves no usable cache behind and the owner
    /// must not start serving.
    pub async fn initialize(config: &Config) -> Result<Self, RangewatchError> {
        let fetcher = Fetcher::new(config.timeout()?)?;
        let ipv4_url = config.sources.ipv4.clone();
        let ipv6_url = config.sources.ipv6.clone();

        let ranges = fetch_combined(&fetcher, &ipv4_url, &ipv6_url).await?;
        if ranges.is_empty() {
            return Err(RangewatchError::EmptySources);
        }
        info!(count = ranges.len(), "published initial range set");

        Ok(Self {
            ranges: RwLock::new(Arc::from(ranges)),
            fetcher,
            ipv4_url,
            ipv6_url,
            interval: config.interval()?,
        })
    }

    /// The live range set. Holds the read lock only to clone the Arc,
    /// so readers contend with the writer's swap, never its fetch.
    pub fn current_ranges(&self) -> Arc<[IpNet]> {
        self.ranges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `ip` falls inside any live range.
    pub fn is_trusted(&self, ip: IpAddr) -> bool {
        range_set_contains(&self.current_ranges(), ip)
    }

    /// Spawn the refresh loop as a background task.
    pub fn spawn_refresh(self: &Arc<Self>, shutdown: ShutdownToken) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.refresh_loop(shutdown).await })
    }

    /// Run until `shutdown` fires. Each tick refetches both sources
    /// and swaps the published set; a failed tick keeps the old set
    /// untouched. Cancellation is the only way out.
    pub async fn refresh_loop(&self, mut shutdown: ShutdownToken) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.refresh_once().await,
                _ = shutdown.cancelled() => {
                    info!("refresh loop stopped");
                    return;
                }
            }
        }
    }

    /// One refresh attempt. Both sources must come back clean before
    /// the published set is touched; a v6 failure discards the v4
    /// result just fetched.
    async fn refresh_once(&self) {
        let ranges = match fetch_combined(&self.fetcher, &self.ipv4_url, &self.ipv6_url).await {
            Ok(ranges) => ranges,
            Err(err) => {
                warn!(error = %err, "refresh failed, keeping previous ranges");
                return;
            }
        };
        let count = ranges.len();
        *self
            .ranges
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::from(ranges);
        info!(count, "published refreshed range set");
    }
}

impl RangeSource for RangeCache {
    fn current_ranges(&self) -> Arc<[IpNet]> {
        RangeCache::current_ranges(self)
    }
}

/// Fetch the IPv4 list then the IPv6 list, concatenated in that
/// order. The first failure aborts the pair.
async fn fetch_combined(
    fetcher: &Fetcher,
    ipv4_url: &str,
    ipv6_url: &str,
) -> Result<Vec<IpNet>, RangewatchError> {
    let mut ranges = fetcher.fetch(ipv4_url).await?;
    ranges.extend(fetcher.fetch(ipv6_url).await?);
    Ok(ranges)
}
