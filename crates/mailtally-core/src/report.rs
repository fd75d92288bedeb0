//! Plain-text report of a finished tally.

use std::io::{self, Write};

use crate::tally::{RankedEntry, Tally, TallyStats};

/// Ranked sender (and optionally domain) counts, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    stats: TallyStats,
    senders: Vec<RankedEntry>,
    domains: Option<Vec<RankedEntry>>,
    verbose: bool,
}

impl Report {
    /// Ranks the tables of `tally`.
    ///
    /// With `verbose`, the lists are framed by heading and total lines.
    #[must_use]
    pub fn from_tally(tally: &Tally, verbose: bool) -> Self {
        Self {
            stats: tally.stats(),
            senders: tally.senders().ranked(),
            domains: tally.domains().map(|d| d.ranked()),
            verbose,
        }
    }

    /// Ranked senders.
    #[must_use]
    pub fn senders(&self) -> &[RankedEntry] {
        &self.senders
    }

    /// Ranked domains, if domain tracking was on.
    #[must_use]
    pub fn domains(&self) -> Option<&[RankedEntry]> {
        self.domains.as_deref()
    }

    /// Writes the report.
    ///
    /// Writes nothing if no message was fetched, except that a verbose report
    /// still states how many fetches were skipped.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let TallyStats {
            total,
            counted,
            skipped,
            without_domain,
        } = self.stats;

        if total == 0 {
            if self.verbose && skipped > 0 {
                writeln!(out, "{skipped} emails skipped")?;
                return out.flush();
            }
            return Ok(());
        }

        if self.verbose {
            writeln!(out, "Top senders (in {total} emails):")?;
        }
        write_entries(out, &self.senders)?;

        if self.verbose {
            writeln!(out, "{counted} emails counted")?;
            if skipped > 0 {
                writeln!(out, "{skipped} emails skipped")?;
            }
        }

        if let Some(domains) = &self.domains {
            if self.verbose {
                writeln!(out, "Top domains (in {total} emails):")?;
            }
            write_entries(out, domains)?;
            if self.verbose && without_domain > 0 {
                writeln!(out, "{without_domain} emails without a domain")?;
            }
        }

        out.flush()
    }
}

fn write_entries<W: Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}\t{}", entry.count, entry.name)?;
    }
    Ok(())
}
