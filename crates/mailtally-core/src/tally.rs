//! Frequency tables, ranking, and the per-run tally.

use std::cmp::Reverse;
use std::collections::HashMap;

use mailtally_gmail::{Header, find_header};

use crate::address::sender_domain;

/// Header consulted for the sender.
const FROM_HEADER: &str = "From";

/// Occurrence counts keyed by sender or domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Adds `count` occurrences of `key`.
    pub fn add(&mut self, key: &str, count: u64) {
        if let Some(existing) = self.counts.get_mut(key) {
            *existing += count;
        } else {
            self.counts.insert(key.to_string(), count);
        }
    }

    /// Returns the count for `key` (zero if absent).
    #[must_use]
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(key, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Adds every count of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (key, count) in other.iter() {
            self.add(key, count);
        }
    }

    /// Entries ordered by descending count. See [`rank`].
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedEntry> {
        rank(self)
    }
}

/// One line of a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Sender or domain.
    pub name: String,
    /// Number of messages.
    pub count: u64,
}

/// Orders a table by count, highest first.
///
/// Equal counts are ordered by name so output is reproducible run to run.
#[must_use]
pub fn rank(table: &FrequencyTable) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(name, count)| RankedEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_unstable_by(|a, b| {
        Reverse(a.count)
            .cmp(&Reverse(b.count))
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Scalar counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyStats {
    /// Messages whose metadata was fetched.
    pub total: u64,
    /// Fetched messages that carried a `From` header.
    pub counted: u64,
    /// Messages dropped because their fetch failed (skip policy only).
    pub skipped: u64,
    /// Counted messages whose sender had no recognisable domain.
    pub without_domain: u64,
}

/// Everything accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    senders: FrequencyTable,
    domains: Option<FrequencyTable>,
    stats: TallyStats,
}

impl Tally {
    /// Creates an empty tally, optionally tracking domains as well.
    #[must_use]
    pub fn new(by_domain: bool) -> Self {
        Self {
            senders: FrequencyTable::new(),
            domains: by_domain.then(FrequencyTable::new),
            stats: TallyStats::default(),
        }
    }

    /// Folds one fetched message into the tally.
    ///
    /// The message always counts toward `total`; it reaches the tables only
    /// if it has a `From` header.
    pub fn record(&mut self, headers: &[Header]) {
        self.stats.total += 1;

        let Some(from) = find_header(headers, FROM_HEADER) else {
            return;
        };

        self.stats.counted += 1;
        self.senders.increment(from);

        if let Some(domains) = &mut self.domains {
            match sender_domain(from) {
                Some(domain) => domains.increment(&domain),
                None => self.stats.without_domain += 1,
            }
        }
    }

    /// Notes a message that was skipped after a failed fetch.
    pub const fn record_skip(&mut self) {
        self.stats.skipped += 1;
    }

    /// Adds another tally (e.g. one built from a different page) into this one.
    pub fn merge(&mut self, other: &Self) {
        self.senders.merge(&other.senders);
        if let (Some(mine), Some(theirs)) = (&mut self.domains, &other.domains) {
            mine.merge(theirs);
        }
        self.stats.total += other.stats.total;
        self.stats.counted += other.stats.counted;
        self.stats.skipped += other.stats.skipped;
        self.stats.without_domain += other.stats.without_domain;
    }

    /// Sender counts, keyed by the raw `From` value.
    #[must_use]
    pub const fn senders(&self) -> &FrequencyTable {
        &self.senders
    }

    /// Domain counts, if domain tracking is on.
    #[must_use]
    pub const fn domains(&self) -> Option<&FrequencyTable> {
        self.domains.as_ref()
    }

    /// Run counters.
    #[must_use]
    pub const fn stats(&self) -> TallyStats {
        self.stats
    }
}
