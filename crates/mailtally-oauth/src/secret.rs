//! Google Cloud console `client_secret.json` loading.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::flow::OAuthClient;
use crate::provider::Provider;

/// OAuth client credentials as downloaded from the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    /// Client ID.
    pub client_id: String,
    /// Client secret. Installed apps get one even though it is not confidential.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Authorization endpoint.
    #[serde(default)]
    pub auth_uri: Option<String>,
    /// Token endpoint.
    #[serde(default)]
    pub token_uri: Option<String>,
    /// Registered redirect URIs; the first one is used.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// The console wraps the credentials in an `installed` or `web` object.
#[derive(Debug, Deserialize)]
struct SecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Parses the JSON contents of a client secret file.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or holds neither an
    /// `installed` nor a `web` section.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SecretFile = serde_json::from_str(json)?;
        let secret = file.installed.or(file.web).ok_or_else(|| {
            Error::ClientSecret("expected an \"installed\" or \"web\" section".into())
        })?;

        if secret.client_id.trim().is_empty() {
            return Err(Error::ClientSecret("client_id is empty".into()));
        }
        Ok(secret)
    }

    /// Reads and parses a client secret file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    /// Builds the Google provider, honouring endpoints from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint in the file is not a valid URL.
    pub fn provider(&self) -> Result<Provider> {
        match (&self.auth_uri, &self.token_uri) {
            (Some(auth), Some(token)) => Provider::google_with_endpoints(auth, token),
            _ => Provider::google(),
        }
    }

    /// Converts the credentials into an [`OAuthClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the provider endpoints are invalid.
    pub fn into_client(self) -> Result<OAuthClient> {
        let provider = self.provider()?;
        let mut client = OAuthClient::new(self.client_id, provider);
        if let Some(secret) = self.client_secret {
            client = client.with_client_secret(secret);
        }
        if let Some(uri) = self.redirect_uris.into_iter().next() {
            client = client.with_redirect_uri(uri);
        }
        Ok(client)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const INSTALLED: &str = r#"{
        "installed": {
            "client_id": "123.apps.googleusercontent.com",
            "project_id": "tally",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "auth_provider_x509_cert_url": "https://www.googleapis.com/oauth2/v1/certs",
            "client_secret": "GOCSPX-secret",
            "redirect_uris": ["http://localhost"]
        }
    }"#;

    #[test]
    fn test_installed_secret() {
        let secret = ClientSecret::from_json(INSTALLED).unwrap();
        assert_eq!(secret.client_id, "123.apps.googleusercontent.com");

        let client = secret.into_client().unwrap();
        assert_eq!(client.client_secret.as_deref(), Some("GOCSPX-secret"));
        assert_eq!(client.redirect_uri.as_deref(), Some("http://localhost"));
        assert_eq!(client.provider.auth_url.path(), "/o/oauth2/auth");
    }

    #[test]
    fn test_web_secret_without_endpoints() {
        let secret =
            ClientSecret::from_json(r#"{"web":{"client_id":"abc","redirect_uris":[]}}"#).unwrap();
        let client = secret.into_client().unwrap();
        assert!(client.redirect_uri.is_none());
        assert_eq!(client.provider.name, "Google");
    }

    #[test]
    fn test_missing_section() {
        let err = ClientSecret::from_json(r#"{"other":{}}"#).unwrap_err();
        assert!(matches!(err, Error::ClientSecret(_)));
    }

    #[test]
    fn test_empty_client_id() {
        let err = ClientSecret::from_json(r#"{"installed":{"client_id":" "}}"#).unwrap_err();
        assert!(matches!(err, Error::ClientSecret(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ClientSecret::from_json("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = ClientSecret::load("/nonexistent/client_secret.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
