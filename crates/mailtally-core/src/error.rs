//! Error types for the tally pipeline.

use mailtally_gmail::MessageId;
use thiserror::Error;

/// Errors that abort a tally run.
#[derive(Debug, Error)]
pub enum Error {
    /// Listing a page of messages failed.
    #[error("Unable to retrieve messages (page {page}): {source}")]
    List {
        /// 1-based number of the page that failed.
        page: usize,
        /// Underlying API error.
        source: mailtally_gmail::Error,
    },

    /// Fetching a single message's metadata failed.
    #[error("Could not fetch email with id {id}: {source}")]
    Fetch {
        /// Message that could not be fetched.
        id: MessageId,
        /// Underlying API error.
        source: mailtally_gmail::Error,
    },

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
