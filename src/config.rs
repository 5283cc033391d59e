//! Configuration management for rangewatch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::RangewatchError;

/// Refresh interval applied when the configured one parses to zero.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Provider range-list endpoints
    pub sources: SourcesConfig,

    /// Refresh interval (e.g. "30m", "1h")
    pub interval: String,

    /// Per-fetch timeout (e.g. "30s"); absent means no deadline, the
    /// fetch is then bounded only by cancellation
    pub timeout: Option<String>,
}

/// The two plain-text list endpoints, one CIDR expression per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub ipv4: String,
    pub ipv6: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            interval: "1h".to_string(),
            timeout: None,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            ipv4: "https://www.cloudflare.com/ips-v4".to_string(),
            ipv6: "https://www.cloudflare.com/ips-v6".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file
    /// does not exist. The default endpoints need no config file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        parse_duration(&self.interval)
            .with_context(|| format!("Invalid interval '{}'", self.interval))?;

        if let Some(ref timeout) = self.timeout {
            parse_duration(timeout).with_context(|| format!("Invalid timeout '{timeout}'"))?;
        }

        for (name, url) in [
            ("ipv4", &self.sources.ipv4),
            ("ipv6", &self.sources.ipv6),
        ] {
            if !url.starts_with("https://") {
                anyhow::bail!("Source '{}' URL must use HTTPS: {}", name, url);
            }
        }

        Ok(())
    }

    /// The refresh interval. A zero value falls back to one hour.
    pub fn interval(&self) -> Result<Duration, RangewatchError> {
        let interval = parse_duration(&self.interval)?;
        if interval.is_zero() {
            Ok(DEFAULT_INTERVAL)
        } else {
            Ok(interval)
        }
    }

    /// The per-fetch timeout. Absent or zero means no deadline.
    pub fn timeout(&self) -> Result<Option<Duration>, RangewatchError> {
        match self.timeout {
            Some(ref value) => {
                let timeout = parse_duration(value)?;
                Ok((!timeout.is_zero()).then_some(timeout))
            }
            None => Ok(None),
        }
    }
}

/// Parse a duration string (e.g. "500ms", "45s", "30m", "4h", "1d").
///
/// Requires ASCII-only input to prevent Unicode edge cases with the
/// suffix split.
pub fn parse_duration(value: &str) -> Result<Duration, RangewatchError> {
    let invalid = || {
        RangewatchError::Config(format!(
            "invalid duration '{value}', use formats like '30s', '30m', '1h', '1d'"
        ))
    };

    if !value.is_ascii() || value.len() < 2 {
        return Err(invalid());
    }

    let (number, unit_ms) = if let Some(n) = value.strip_suffix("ms") {
        (n, 1u64)
    } else if let Some(n) = value.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = value.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = value.strip_suffix('h') {
        (n, 3_600_000)
    } else if let Some(n) = value.strip_suffix('d') {
        (n, 86_400_000)
    } else {
        return Err(invalid());
    };

    let count: u32 = number.parse().map_err(|_| invalid())?;
    Ok(Duration::from_millis(u64::from(count) * unit_ms))
}
