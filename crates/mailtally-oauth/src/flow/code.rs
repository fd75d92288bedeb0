//! Authorization Code Flow implementation.

use super::{OAuthClient, PkceChallenge};
use crate::error::{Error, Result};
use crate::token::Token;
use url::Url;

/// Authorization Code Flow for `OAuth2`.
///
/// The user opens the authorization URL in a browser, grants access, and
/// copies the code (or the whole redirect URL) back into the terminal.
#[derive(Debug)]
pub struct AuthorizationCodeFlow {
    client: OAuthClient,
    pkce: Option<PkceChallenge>,
}

impl AuthorizationCodeFlow {
    /// Creates a new authorization code flow.
    #[must_use]
    pub const fn new(client: OAuthClient) -> Self {
        Self { client, pkce: None }
    }

    /// Enables PKCE for enhanced security (recommended for public clients).
    #[must_use]
    pub fn with_pkce(mut self) -> Self {
        self.pkce = Some(PkceChallenge::generate());
        self
    }

    /// Builds the authorization URL for user consent.
    ///
    /// # Arguments
    ///
    /// * `scopes` - Optional scopes to request (uses provider defaults if None)
    /// * `state` - Optional state parameter for CSRF protection
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed.
    pub fn authorization_url(&self, scopes: Option<&[String]>, state: Option<&str>) -> Result<Url> {
        self.client.provider.validate()?;
        let mut url = self.client.provider.auth_url.clone();

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.client.client_id)
                .append_pair("response_type", "code");

            if let Some(redirect_uri) = &self.client.redirect_uri {
                pairs.append_pair("redirect_uri", redirect_uri);
            }

            let scope_str = scopes.map_or_else(
                || self.client.provider.default_scopes.join(" "),
                |s| s.join(" "),
            );

            if !scope_str.is_empty() {
                pairs.append_pair("scope", &scope_str);
            }

            if let Some(state_val) = state {
                pairs.append_pair("state", state_val);
            }

            if let Some(pkce) = &self.pkce {
                pairs
                    .append_pair("code_challenge", pkce.challenge())
                    .append_pair("code_challenge_method", pkce.method());
            }

            // Offline access is what makes Google hand out a refresh token.
            pairs
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");
        }

        Ok(url)
    }

    /// Exchanges the authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn exchange_code(&self, code: &str, redirect_uri: Option<&str>) -> Result<Token> {
        let code_verifier = self.pkce.as_ref().map(PkceChallenge::verifier);
        self.client
            .exchange_code(code, redirect_uri, code_verifier)
            .await
    }
}

/// Extracts the authorization code from what the user pasted.
///
/// Accepts either the bare code or the full redirect URL
/// (`http://localhost/?code=...&scope=...`).
///
/// # Errors
///
/// Returns an error if the input is empty, or if it is a URL carrying an
/// `error` parameter or no `code` parameter.
pub fn parse_redirect_code(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::InvalidResponse("no authorization code entered".into()));
    }

    let Ok(url) = Url::parse(input) else {
        return Ok(input.to_string());
    };

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => {
                return Err(Error::OAuth {
                    error: value.into_owned(),
                    description: "authorization denied".into(),
                });
            }
            _ => {}
        }
    }

    code.ok_or_else(|| Error::InvalidResponse(format!("no code parameter in {input}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    #[test]
    fn test_authorization_url() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("test_client", provider).with_redirect_uri("http://localhost");

        let flow = AuthorizationCodeFlow::new(client);
        let url = flow.authorization_url(None, Some("random_state")).unwrap();

        assert!(url.as_str().contains("client_id=test_client"));
        assert!(url.as_str().contains("response_type=code"));
        assert!(url.as_str().contains("state=random_state"));
        assert!(url.as_str().contains("redirect_uri=http%3A%2F%2Flocalhost"));
        assert!(url.as_str().contains("gmail.readonly"));
        assert!(url.as_str().contains("access_type=offline"));
    }

    #[test]
    fn test_authorization_url_with_pkce() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("test_client", provider);

        let flow = AuthorizationCodeFlow::new(client).with_pkce();
        let url = flow.authorization_url(None, None).unwrap();

        assert!(url.as_str().contains("code_challenge="));
        assert!(url.as_str().contains("code_challenge_method=S256"));
        assert!(flow.pkce.is_some());
    }

    #[test]
    fn test_authorization_url_custom_scopes() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("test_client", provider);

        let flow = AuthorizationCodeFlow::new(client);
        let scopes = vec!["email".to_string(), "profile".to_string()];
        let url = flow.authorization_url(Some(&scopes), None).unwrap();

        assert!(url.as_str().contains("scope=email+profile"));
    }

    #[test]
    fn test_parse_bare_code() {
        assert_eq!(parse_redirect_code("  4/0Abc-def \n").unwrap(), "4/0Abc-def");
    }

    #[test]
    fn test_parse_redirect_url() {
        let code =
            parse_redirect_code("http://localhost/?code=4%2F0Abc&scope=gmail.readonly").unwrap();
        assert_eq!(code, "4/0Abc");
    }

    #[test]
    fn test_parse_redirect_url_with_error() {
        let err = parse_redirect_code("http://localhost/?error=access_denied").unwrap_err();
        assert!(matches!(err, Error::OAuth { ref error, .. } if error == "access_denied"));
    }

    #[test]
    fn test_parse_redirect_url_without_code() {
        assert!(parse_redirect_code("http://localhost/?state=x").is_err());
        assert!(parse_redirect_code("   ").is_err());
    }
}
