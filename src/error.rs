//! Error types for rangewatch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RangewatchError {
    /// Network, DNS, or body-read failure while fetching a source list.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A source line that does not parse as a CIDR expression.
    #[error("line {line}: not a CIDR expression: {input:?}")]
    Parse { line: usize, input: String },

    /// Malformed configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Both sources fetched cleanly but yielded no prefixes.
    #[error("sources produced an empty range set")]
    EmptySources,
}
