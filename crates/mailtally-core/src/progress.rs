//! Progress reporting while messages are fetched.

use std::io::Write;

use tracing::debug;

/// Receives progress events from the aggregator.
pub trait ProgressSink {
    /// One message fetch finished (successfully or skipped).
    fn message_done(&mut self);

    /// Every fetch of the current page finished.
    fn page_done(&mut self);
}

/// Discards progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn message_done(&mut self) {}

    fn page_done(&mut self) {}
}

/// Writes a `.` per message and a newline per page.
#[derive(Debug)]
pub struct DotProgress<W: Write> {
    out: Option<W>,
}

impl<W: Write> DotProgress<W> {
    /// Creates a sink writing to `out` (typically stderr).
    pub const fn new(out: W) -> Self {
        Self { out: Some(out) }
    }

    /// Returns the underlying writer, if it has not failed.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    fn emit(&mut self, bytes: &[u8]) {
        let Some(out) = &mut self.out else {
            return;
        };
        // A broken status stream must not abort the tally; stop writing instead.
        if let Err(e) = out.write_all(bytes).and_then(|()| out.flush()) {
            debug!("disabling progress output: {e}");
            self.out = None;
        }
    }
}

impl<W: Write> ProgressSink for DotProgress<W> {
    fn message_done(&mut self) {
        self.emit(b".");
    }

    fn page_done(&mut self) {
        self.emit(b"\n");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dots_and_newlines() {
        let mut progress = DotProgress::new(Vec::new());
        progress.message_done();
        progress.message_done();
        progress.page_done();
        progress.message_done();
        progress.page_done();
        assert_eq!(progress.into_inner().unwrap(), b"..\n.\n");
    }

    #[test]
    fn test_broken_writer_is_dropped() {
        let mut progress = DotProgress::new(Broken);
        progress.message_done();
        progress.page_done();
        assert!(progress.into_inner().is_none());
    }
}
