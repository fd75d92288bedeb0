//! Gmail API types.
//!
//! The public types (`MessageId`, `Header`, `MessagePage`) are what callers
//! work with; the `*Response` types mirror the JSON wire format and are
//! converted at the client boundary.

use serde::Deserialize;

/// Opaque Gmail message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Creates a message ID from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single message header field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Header {
    /// Header name, as sent by the server (case preserved).
    pub name: String,
    /// Raw header value.
    pub value: String,
}

impl Header {
    /// Creates a header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the value of the first header whose name matches exactly.
///
/// The comparison is case-sensitive: `from` does not match `From`.
#[must_use]
pub fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

/// One page of a message listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePage {
    /// Message IDs on this page.
    pub messages: Vec<MessageId>,
    /// Cursor for the next page; `None` once the listing is exhausted.
    pub next_page_token: Option<String>,
}

impl MessagePage {
    /// Returns true if another page follows.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_page_token.is_some()
    }
}

/// `users.messages.list` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    /// Absent when the query matched nothing.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Entry of a list response.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageRef {
    pub id: MessageId,
}

impl From<ListResponse> for MessagePage {
    fn from(response: ListResponse) -> Self {
        Self {
            messages: response.messages.into_iter().map(|m| m.id).collect(),
            // An empty string is how some clients spell "no more pages".
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

/// `users.messages.get?format=metadata` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct MetadataResponse {
    #[serde(default)]
    pub payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Payload {
    #[serde(default)]
    pub headers: Vec<Header>,
}

impl MetadataResponse {
    pub(crate) fn into_headers(self) -> Vec<Header> {
        self.payload.map(|p| p.headers).unwrap_or_default()
    }
}

/// Google JSON error envelope: `{"error": {"code": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_with_next_page() {
        let json = r#"{
            "messages": [
                {"id": "18c1", "threadId": "18c1"},
                {"id": "18c2", "threadId": "18b0"}
            ],
            "nextPageToken": "09876",
            "resultSizeEstimate": 201
        }"#;
        let page: MessagePage = serde_json::from_str::<ListResponse>(json).unwrap().into();
        assert_eq!(page.messages, vec![MessageId::new("18c1"), MessageId::new("18c2")]);
        assert_eq!(page.next_page_token.as_deref(), Some("09876"));
        assert!(page.has_next());
    }

    #[test]
    fn test_empty_list_response() {
        let page: MessagePage = serde_json::from_str::<ListResponse>(r#"{"resultSizeEstimate":0}"#)
            .unwrap()
            .into();
        assert!(page.messages.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_page_token_means_done() {
        let page: MessagePage =
            serde_json::from_str::<ListResponse>(r#"{"messages":[],"nextPageToken":""}"#)
                .unwrap()
                .into();
        assert!(!page.has_next());
    }

    #[test]
    fn test_metadata_response() {
        let json = r#"{
            "id": "18c1",
            "payload": {
                "mimeType": "multipart/alternative",
                "headers": [
                    {"name": "From", "value": "Jane Doe <jane@example.com>"}
                ]
            },
            "sizeEstimate": 5120
        }"#;
        let headers = serde_json::from_str::<MetadataResponse>(json)
            .unwrap()
            .into_headers();
        assert_eq!(find_header(&headers, "From"), Some("Jane Doe <jane@example.com>"));
    }

    #[test]
    fn test_metadata_without_payload() {
        let headers = serde_json::from_str::<MetadataResponse>(r#"{"id":"x"}"#)
            .unwrap()
            .into_headers();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_find_header_is_case_sensitive() {
        let headers = vec![Header::new("from", "a@x.com"), Header::new("Subject", "hi")];
        assert_eq!(find_header(&headers, "From"), None);
        assert_eq!(find_header(&headers, "from"), Some("a@x.com"));
    }

    #[test]
    fn test_find_header_returns_first_match() {
        let headers = vec![Header::new("From", "first@x.com"), Header::new("From", "second@x.com")];
        assert_eq!(find_header(&headers, "From"), Some("first@x.com"));
    }
}
