//! HTTP client for the Gmail REST API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{
    ErrorEnvelope, Header, ListResponse, MessageId, MessagePage, MetadataResponse,
};

/// Public Gmail API root.
pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// The special user ID meaning "the authenticated user".
const DEFAULT_USER: &str = "me";

/// Only header the metadata fetch asks for.
const METADATA_HEADER: &str = "From";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated Gmail API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    base_url: Url,
    user: String,
    access_token: String,
    page_size: Option<u32>,
}

impl GmailClient {
    /// Creates a client for the authenticated user with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            user: DEFAULT_USER.to_string(),
            access_token: access_token.into(),
            page_size: None,
        })
    }

    /// Points the client at a different API root (e.g. a local test server).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Url::parse(base_url.as_ref())?;
        Ok(self)
    }

    /// Sets the user ID (defaults to `me`).
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets `maxResults` for list calls. The server caps it at 500.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Lists one page of message IDs matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unexpected response body.
    pub async fn list_messages(&self, query: &str, page_token: Option<&str>) -> Result<MessagePage> {
        let mut url = self.messages_url(&[])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
            if let Some(size) = self.page_size {
                pairs.append_pair("maxResults", &size.to_string());
            }
        }

        let response: ListResponse = self.get_json(url).await?;
        let page = MessagePage::from(response);
        debug!(
            count = page.messages.len(),
            has_next = page.has_next(),
            "listed message page"
        );
        Ok(page)
    }

    /// Fetches the `From` header of a single message, without its body.
    ///
    /// Returns every header the server sent back; for a message without a
    /// `From` field that is usually an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unexpected response body.
    pub async fn get_message_metadata(&self, id: &MessageId) -> Result<Vec<Header>> {
        let mut url = self.messages_url(&[id.as_str()])?;
        url.query_pairs_mut()
            .append_pair("format", "metadata")
            .append_pair("metadataHeaders", METADATA_HEADER);

        let response: MetadataResponse = self.get_json(url).await?;
        Ok(response.into_headers())
    }

    /// Builds `{base}/users/{user}/messages[/extra...]`.
    fn messages_url(&self, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", self.user.as_str(), "messages"])
            .extend(extra);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let client = GmailClient::new("t").unwrap();
        let url = client.messages_url(&[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gmail.googleapis.com/gmail/v1/users/me/messages"
        );
    }

    #[test]
    fn test_message_url_with_trailing_slash_base() {
        let client = GmailClient::new("t")
            .unwrap()
            .with_base_url("http://127.0.0.1:9/gmail/v1/")
            .unwrap()
            .with_user("jane@example.com");
        let url = client.messages_url(&["18c1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/gmail/v1/users/jane@example.com/messages/18c1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GmailClient::new("t").unwrap().with_base_url("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_auth_error_classification() {
        let err = Error::Api {
            status: 401,
            message: "Invalid Credentials".into(),
        };
        assert!(err.is_auth());
        let err = Error::Api {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(!err.is_auth());
    }
}
