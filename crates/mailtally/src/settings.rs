//! Optional settings file and the merge with command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mailtally_core::{AggregatorConfig, DEFAULT_CONCURRENCY, FailurePolicy};
use serde::Deserialize;

use crate::cli::Cli;

const DEFAULT_QUERY: &str = "is:inbox";
const DEFAULT_USER: &str = "me";
const DEFAULT_CLIENT_SECRET: &str = "client_secret.json";

/// `mailtally` directory under the platform config dir.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailtally")
}

/// Contents of `settings.json`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub query: Option<String>,
    pub user: Option<String>,
    pub concurrency: Option<usize>,
    pub page_size: Option<u32>,
    pub on_error: Option<FailurePolicy>,
    pub client_secret: Option<PathBuf>,
    pub token_cache: Option<PathBuf>,
}

impl Settings {
    /// Loads `settings.json` from the config dir, or defaults if absent.
    pub async fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_dir().join("settings.json")).await
    }

    /// Loads settings from `path`, or defaults if the file does not exist.
    pub async fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Unable to read {}", path.display()));
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Unable to parse {}", path.display()))
    }
}

/// Effective run options: flags, then the settings file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub query: String,
    pub user: String,
    pub page_size: Option<u32>,
    pub aggregator: AggregatorConfig,
    pub progress: bool,
    pub verbose: bool,
    pub client_secret: PathBuf,
    pub token_cache: PathBuf,
}

impl Options {
    /// Merges the sources and checks the result before any network traffic.
    pub fn resolve(cli: Cli, settings: Settings) -> anyhow::Result<Self> {
        let options = Self {
            query: cli
                .query
                .or(settings.query)
                .unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            user: cli
                .user
                .or(settings.user)
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            page_size: cli.page_size.or(settings.page_size),
            aggregator: AggregatorConfig {
                by_domain: cli.domains,
                concurrency: cli
                    .concurrency
                    .map(usize::from)
                    .or(settings.concurrency)
                    .unwrap_or(DEFAULT_CONCURRENCY),
                policy: cli.on_error.or(settings.on_error).unwrap_or_default(),
            },
            progress: cli.progress,
            verbose: cli.verbose,
            client_secret: cli
                .client_secret
                .or(settings.client_secret)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_SECRET)),
            token_cache: cli
                .token_cache
                .or(settings.token_cache)
                .unwrap_or_else(|| config_dir().join("token.json")),
        };

        options
            .aggregator
            .validate()
            .context("Invalid settings")?;
        Ok(options)
    }
}
