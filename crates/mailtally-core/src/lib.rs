//! # mailtally-core
//!
//! The sender tally pipeline behind `mailtally`.
//!
//! A [`PageFetcher`] walks the paginated message listing of a [`MailSource`].
//! For each page, a [`MessageAggregator`] fetches the header metadata of every
//! message concurrently (capped by [`AggregatorConfig::concurrency`]) and
//! folds the `From` values into a [`Tally`]. Once the listing is exhausted a
//! [`Report`] ranks and prints the counts.
//!
//! ```text
//!  list page ──► fan-out fetch (≤ N in flight) ──► join ──► next page ...
//!                         │
//!                         ▼
//!                 Tally (single owner)
//!                         │
//!                         ▼
//!                  rank ──► Report
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use mailtally_core::{AggregatorConfig, DotProgress, Report, tally_messages};
//!
//! let client = mailtally_gmail::GmailClient::new(access_token)?;
//! let mut progress = DotProgress::new(std::io::stderr());
//! let tally = tally_messages(&client, "is:inbox", AggregatorConfig::default(), &mut progress).await?;
//! Report::from_tally(&tally, true).write_to(&mut std::io::stdout().lock())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod address;
mod aggregate;
mod error;
mod pages;
mod progress;
mod report;
mod source;
pub mod tally;

pub use address::sender_domain;
pub use aggregate::{
    AggregatorConfig, DEFAULT_CONCURRENCY, FailurePolicy, MessageAggregator, tally_messages,
};
pub use error::{Error, Result};
pub use pages::PageFetcher;
pub use progress::{DotProgress, NoProgress, ProgressSink};
pub use report::Report;
pub use source::MailSource;
pub use tally::{FrequencyTable, RankedEntry, Tally, TallyStats, rank};
