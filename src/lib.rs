//! # rangewatch - Trusted Proxy IP Ranges
//!
//! A self-refreshing, concurrently-readable set of IP address
//! prefixes (CIDRs) fetched from a provider's published lists, used
//! to decide whether a connection's peer address belongs to a known
//! proxy.
//!
//! ## How it works
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      rangewatch                        │
//! ├────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                            │
//! │    └── Commands: run, show, check, version             │
//! ├────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                   │
//! │    └── sources, interval, timeout                      │
//! ├────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                            │
//! │    └── one GET per list, strict line-by-line parse     │
//! ├────────────────────────────────────────────────────────┤
//! │  RangeCache (RwLock<Arc<[IpNet]>>)                     │
//! │    ├── initialize: v4 + v6, fail fast                  │
//! │    └── refresh loop: swap on success, keep on failure  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache fetches both lists synchronously at startup and refuses
//! to provision if either fails. A background task then refetches on
//! a fixed interval; a failed tick leaves the published set alone, so
//! readers keep the last good data until a refresh succeeds.
//!
//! ## Example Usage
//!
//! ```no_run
//! use rangewatch::cache::RangeCache;
//! use rangewatch::config::Config;
//! use rangewatch::shutdown;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("/etc/rangewatch/config.yaml")?;
//!
//!     // Fail fast if the provider is unreachable at startup
//!     let cache = Arc::new(RangeCache::initialize(&config).await?);
//!
//!     let (handle, token) = shutdown::channel();
//!     let refresh = cache.spawn_refresh(token);
//!
//!     // Hand `cache` to request handling; per request:
//!     let _trusted = cache.is_trusted("203.0.113.7".parse()?);
//!
//!     handle.trigger();
//!     refresh.await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cache`] - The published range set and its refresh loop
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error taxonomy
//! - [`fetcher`] - HTTP client for downloading range lists
//! - [`shutdown`] - Graceful shutdown signal handling

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod shutdown;

pub use cache::{RangeCache, RangeSource};
pub use config::Config;
pub use error::RangewatchError;
