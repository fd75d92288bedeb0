//! Command-line flags.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use mailtally_core::FailurePolicy;

/// Rank the senders of a Gmail inbox.
#[derive(Debug, Parser)]
#[command(name = "mailtally", version, about, long_about = None)]
pub struct Cli {
    /// Print a dot on stderr for every fetched message
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = true, default_missing_value = "true")]
    pub progress: bool,

    /// Also rank sender domains
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub domains: bool,

    /// Print headings and totals around the rankings
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = true, default_missing_value = "true")]
    pub verbose: bool,

    /// Gmail search query selecting the messages to count [default: is:inbox]
    #[arg(long)]
    pub query: Option<String>,

    /// Gmail user ID [default: me]
    #[arg(long)]
    pub user: Option<String>,

    /// Maximum metadata requests in flight [default: 16]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Messages per listed page (server default 100, max 500)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page_size: Option<u32>,

    /// What to do when a message cannot be fetched: fail-fast or skip [default: fail-fast]
    #[arg(long, value_name = "POLICY")]
    pub on_error: Option<FailurePolicy>,

    /// OAuth client secret downloaded from the Google Cloud console [default: client_secret.json]
    #[arg(long, value_name = "PATH")]
    pub client_secret: Option<PathBuf>,

    /// Where the access/refresh token is cached
    #[arg(long, value_name = "PATH")]
    pub token_cache: Option<PathBuf>,
}
