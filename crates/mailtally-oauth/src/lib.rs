//! # mailtally-oauth
//!
//! `OAuth2` authorization for installed applications talking to the Gmail API.
//!
//! ## Features
//!
//! - **Client secrets**: Loads the `client_secret.json` file downloaded from
//!   the Google Cloud console (`installed` or `web` application types)
//! - **Authorization Code Flow** with PKCE for the one-time consent step
//! - **Token management**: Expiration checking, refresh, and a JSON token cache
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailtally_oauth::{AuthorizationCodeFlow, ClientSecret, TokenCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientSecret::load("client_secret.json").await?.into_client()?;
//!     let cache = TokenCache::new("token.json");
//!
//!     let token = match cache.load().await? {
//!         Some(token) if token.is_valid() => token,
//!         _ => {
//!             let flow = AuthorizationCodeFlow::new(client).with_pkce();
//!             println!("Visit: {}", flow.authorization_url(None, None)?);
//!             let code = "code_from_redirect";
//!             flow.exchange_code(code, None).await?
//!         }
//!     };
//!
//!     cache.save(&token).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cache;
mod error;
pub mod flow;
pub mod provider;
mod secret;
pub mod token;

pub use cache::TokenCache;
pub use error::{Error, Result};
pub use flow::{AuthorizationCodeFlow, OAuthClient, PkceChallenge, parse_redirect_code};
pub use provider::{GMAIL_READONLY_SCOPE, Provider};
pub use secret::ClientSecret;
pub use token::Token;
