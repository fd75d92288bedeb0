//! Paginated message listing.

use mailtally_gmail::MessagePage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::MailSource;

/// Walks a message listing page by page until the continuation token runs out.
#[derive(Debug)]
pub struct PageFetcher<'a, S> {
    source: &'a S,
    query: String,
    next_token: Option<String>,
    pages: usize,
    done: bool,
}

impl<'a, S: MailSource> PageFetcher<'a, S> {
    /// Starts a listing for `query` (e.g. `is:inbox`).
    #[must_use]
    pub fn new(source: &'a S, query: impl Into<String>) -> Self {
        Self {
            source,
            query: query.into(),
            next_token: None,
            pages: 0,
            done: false,
        }
    }

    /// Fetches the next page, or `None` once the previous page was the last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::List`] if the list call fails. The fetcher stays on the
    /// failed page; callers are expected to abort.
    pub async fn next_page(&mut self) -> Result<Option<MessagePage>> {
        if self.done {
            return Ok(None);
        }

        let page_number = self.pages + 1;
        let page = self
            .source
            .list_messages(&self.query, self.next_token.as_deref())
            .await
            .map_err(|source| Error::List {
                page: page_number,
                source,
            })?;

        self.pages = page_number;
        self.next_token.clone_from(&page.next_page_token);
        self.done = self.next_token.is_none();

        debug!(
            page = page_number,
            messages = page.messages.len(),
            last = self.done,
            "fetched message page"
        );
        Ok(Some(page))
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages
    }
}
