//! Obtains an access token: cached, refreshed, or from one-time user consent.

use std::path::Path;

use anyhow::Context;
use mailtally_oauth::{
    AuthorizationCodeFlow, ClientSecret, OAuthClient, Token, TokenCache, parse_redirect_code,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Returns a usable token for the Gmail read-only scope.
///
/// The cached token is used while valid. An expired one is refreshed; if
/// that fails (or there is no cache) the user is walked through consent
/// and the new token is written back to the cache.
pub async fn authorize(client_secret: &Path, cache: &TokenCache) -> anyhow::Result<Token> {
    let secret = ClientSecret::load(client_secret)
        .await
        .with_context(|| format!("Unable to read client secret file {}", client_secret.display()))?;
    let client = secret
        .into_client()
        .context("Unable to parse client secret file to config")?;

    if let Some(token) = cache.load().await.context("Unable to read token cache")? {
        if token.is_valid() {
            debug!(path = %cache.path().display(), "using cached token");
            return Ok(token);
        }

        match client.refresh_token(&token).await {
            Ok(fresh) => {
                info!("refreshed access token");
                store(cache, &fresh).await;
                return Ok(fresh);
            }
            Err(e) => warn!("token refresh failed, authorizing again: {e}"),
        }
    }

    let token = authorize_interactively(client).await?;
    store(cache, &token).await;
    Ok(token)
}

async fn authorize_interactively(client: OAuthClient) -> anyhow::Result<Token> {
    let flow = AuthorizationCodeFlow::new(client).with_pkce();
    let url = flow
        .authorization_url(None, None)
        .context("Unable to build authorization URL")?;

    eprintln!(
        "Go to the following link in your browser, then type the authorization code \
         (or paste the URL you were redirected to):\n\n{url}\n"
    );
    if let Err(e) = opener::open(url.as_str()) {
        debug!("could not open a browser: {e}");
    }

    let line = BufReader::new(tokio::io::stdin())
        .lines()
        .next_line()
        .await
        .context("Unable to read authorization code")?
        .unwrap_or_default();
    let code = parse_redirect_code(&line).context("Unable to read authorization code")?;

    flow.exchange_code(&code, None)
        .await
        .context("Unable to retrieve token from web")
}

async fn store(cache: &TokenCache, token: &Token) {
    match cache.save(token).await {
        Ok(()) => debug!(path = %cache.path().display(), "saved token"),
        // The run can still proceed with the in-memory token.
        Err(e) => warn!(path = %cache.path().display(), "unable to cache oauth token: {e}"),
    }
}
