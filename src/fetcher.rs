//! HTTP fetcher for remote CIDR range lists.

use ipnet::IpNet;
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use crate::error::RangewatchError;

/// HTTP client for fetching provider range lists.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher. With `timeout` set, every request carries that
    /// deadline; without it, requests are bounded only by task
    /// cancellation.
    pub fn new(timeout: Option<Duration>) -> Result<Self, RangewatchError> {
        let mut builder =
            Client::builder().user_agent(format!("rangewatch/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch one source list and parse every non-empty line as a CIDR
    /// expression, preserving source order.
    ///
    /// The response status is not inspected; whatever body the server
    /// returns is scanned. The first unparsable line fails the whole
    /// fetch. No retries; the next refresh tick is the retry policy.
    pub async fn fetch(&self, url: &str) -> Result<Vec<IpNet>, RangewatchError> {
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        let prefixes = parse_range_list(&body)?;
        debug!(url, count = prefixes.len(), "fetched range list");
        Ok(prefixes)
    }
}

// Default is intentionally not implemented for Fetcher because new()
// can fail and we want explicit error handling.

/// Parse a plain-text range list, one CIDR expression per line.
///
/// Lines are trimmed and blank lines skipped; everything else must
/// parse. All-or-nothing: the first bad line aborts with its 1-based
/// line number, never a partial result.
pub fn parse_range_list(content: &str) -> Result<Vec<IpNet>, RangewatchError> {
    let mut prefixes = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let prefix = parse_cidr_expression(token).ok_or_else(|| RangewatchError::Parse {
            line: idx + 1,
            input: token.to_string(),
        })?;
        prefixes.push(prefix);
    }
    Ok(prefixes)
}

/// Parse a single CIDR expression. A bare address (no `/len`) counts
/// as its host prefix, /32 for IPv4 or /128 for IPv6.
pub fn parse_cidr_expression(token: &str) -> Option<IpNet> {
    if token.contains('/') {
        token.parse::<IpNet>().ok()
    } else {
        token.parse::<IpAddr>().ok().map(IpNet::from)
    }
}
