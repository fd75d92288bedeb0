//! Concurrent per-page metadata fetch and aggregation.

use std::fmt;
use std::str::FromStr;

use futures::stream::{self, StreamExt};
use mailtally_gmail::MessagePage;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::pages::PageFetcher;
use crate::progress::ProgressSink;
use crate::source::MailSource;
use crate::tally::Tally;

/// Default cap on in-flight metadata requests.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// What to do when a single message cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first failed fetch.
    #[default]
    FailFast,
    /// Log the failure, count the message as skipped, and carry on.
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fail-fast" => Ok(Self::FailFast),
            "skip" => Ok(Self::Skip),
            other => Err(Error::Config(format!(
                "unknown failure policy {other:?} (expected fail-fast or skip)"
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FailFast => "fail-fast",
            Self::Skip => "skip",
        })
    }
}

/// Aggregator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Also count senders by domain.
    pub by_domain: bool,
    /// Maximum number of metadata requests in flight at once.
    pub concurrency: usize,
    /// Per-message failure handling.
    pub policy: FailurePolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            by_domain: false,
            concurrency: DEFAULT_CONCURRENCY,
            policy: FailurePolicy::FailFast,
        }
    }
}

impl AggregatorConfig {
    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `concurrency` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

/// Fetches message metadata page by page and folds it into a [`Tally`].
///
/// The aggregator is the single owner of the tally: fetches run concurrently,
/// but their results are applied one at a time as they complete, so no
/// locking is needed and no update can be lost.
#[derive(Debug)]
pub struct MessageAggregator<'a, S> {
    source: &'a S,
    config: AggregatorConfig,
    tally: Tally,
}

impl<'a, S: MailSource> MessageAggregator<'a, S> {
    /// Creates an aggregator with an empty tally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(source: &'a S, config: AggregatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            tally: Tally::new(config.by_domain),
        })
    }

    /// Fetches every message of `page` and records the results.
    ///
    /// Returns only after all fetches of the page have completed, which makes
    /// each page a barrier for the listing.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::FailFast`], returns [`Error::Fetch`] for the
    /// first failure. Fetches still in flight are cancelled.
    pub async fn process_page<P: ProgressSink>(
        &mut self,
        page: &MessagePage,
        progress: &mut P,
    ) -> Result<()> {
        let source = self.source;
        let mut fetches = stream::iter(&page.messages)
            .map(move |id| async move { (id, source.get_message_metadata(id).await) })
            .buffer_unordered(self.config.concurrency);

        while let Some((id, result)) = fetches.next().await {
            match result {
                Ok(headers) => self.tally.record(&headers),
                Err(err) => match self.config.policy {
                    FailurePolicy::FailFast => {
                        return Err(Error::Fetch {
                            id: id.clone(),
                            source: err,
                        });
                    }
                    FailurePolicy::Skip => {
                        warn!(%id, "skipping message: {err}");
                        self.tally.record_skip();
                    }
                },
            }
            progress.message_done();
        }

        progress.page_done();
        Ok(())
    }

    /// The tally accumulated so far.
    #[must_use]
    pub const fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Consumes the aggregator, returning the tally.
    #[must_use]
    pub fn into_tally(self) -> Tally {
        self.tally
    }
}

/// Runs the whole pipeline: every page of `query`, fetched and aggregated.
///
/// Nothing is returned unless every page was listed successfully, so a
/// failure part-way through never yields a partial tally.
///
/// # Errors
///
/// Returns the first list error, or the first fetch error under
/// [`FailurePolicy::FailFast`].
pub async fn tally_messages<S: MailSource, P: ProgressSink>(
    source: &S,
    query: &str,
    config: AggregatorConfig,
    progress: &mut P,
) -> Result<Tally> {
    let mut aggregator = MessageAggregator::new(source, config)?;
    let mut pages = PageFetcher::new(source, query);

    while let Some(page) = pages.next_page().await? {
        aggregator.process_page(&page, progress).await?;
        info!(
            page = pages.pages_fetched(),
            messages = page.messages.len(),
            total = aggregator.tally().stats().total,
            "page aggregated"
        );
    }

    let tally = aggregator.into_tally();
    let stats = tally.stats();
    if stats.total == 0 && stats.skipped > 0 {
        warn!(skipped = stats.skipped, "every message fetch failed");
    }
    Ok(tally)
}
