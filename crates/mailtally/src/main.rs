//! mailtally - rank the senders of a Gmail inbox.

mod auth;
mod cli;
mod settings;

use std::io;

use anyhow::Context;
use clap::Parser;
use mailtally_core::{DotProgress, Error, NoProgress, Report, Tally, tally_messages};
use mailtally_gmail::GmailClient;
use mailtally_oauth::TokenCache;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use settings::{Options, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().await?;
    let options = Options::resolve(cli, settings)?;

    let cache = TokenCache::new(&options.token_cache);
    let token = auth::authorize(&options.client_secret, &cache).await?;

    let client = GmailClient::new(token.access_token)
        .context("Unable to retrieve Gmail client")?
        .with_user(options.user.as_str())
        .with_page_size(options.page_size);

    info!(query = %options.query, user = %options.user, "counting messages");
    let tally = run(&client, &options)
        .await
        .map_err(|e| explain(e, &cache))?;

    let report = Report::from_tally(&tally, options.verbose);
    report
        .write_to(&mut io::stdout().lock())
        .context("Unable to write report")?;
    Ok(())
}

async fn run(client: &GmailClient, options: &Options) -> Result<Tally, Error> {
    if options.progress {
        let mut progress = DotProgress::new(io::stderr());
        tally_messages(client, &options.query, options.aggregator, &mut progress).await
    } else {
        tally_messages(client, &options.query, options.aggregator, &mut NoProgress).await
    }
}

/// Adds a hint for rejected credentials, which usually means a revoked grant.
fn explain(err: Error, cache: &TokenCache) -> anyhow::Error {
    let rejected = match &err {
        Error::List { source, .. } | Error::Fetch { source, .. } => source.is_auth(),
        _ => false,
    };
    let err = anyhow::Error::new(err);
    if rejected {
        err.context(format!(
            "Gmail rejected the credentials; delete {} to authorize again",
            cache.path().display()
        ))
    } else {
        err
    }
}
