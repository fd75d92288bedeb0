//! # mailtally-gmail
//!
//! A deliberately small Gmail REST API client. It covers the two calls a
//! sender tally needs:
//!
//! - `users.messages.list`: one page of message IDs for a search query
//! - `users.messages.get` with `format=metadata`: header fields only, no body
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailtally_gmail::GmailClient;
//!
//! #[tokio::main]
//! async fn main() -> mailtally_gmail::Result<()> {
//!     let client = GmailClient::new("ya29.access-token")?;
//!
//!     let mut token = None;
//!     loop {
//!         let page = client.list_messages("is:inbox", token.as_deref()).await?;
//!         for id in &page.messages {
//!             let headers = client.get_message_metadata(id).await?;
//!             println!("{id}: {:?}", mailtally_gmail::find_header(&headers, "From"));
//!         }
//!         match page.next_page_token {
//!             Some(next) => token = Some(next),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod types;

pub use client::{DEFAULT_BASE_URL, GmailClient};
pub use error::{Error, Result};
pub use types::{Header, MessageId, MessagePage, find_header};
