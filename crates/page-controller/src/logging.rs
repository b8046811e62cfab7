//! Log output for hosts without a terminal
//!
//! The browser has no stdout or wall clock usable by the default formatter,
//! so events are formatted without timestamps and handed line by line to a
//! sink such as the devtools console.

use std::fmt;
use std::io::{self, Write};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// `io::Write` adapter passing each complete line to `emit`
///
/// A trailing partial line is emitted on flush or drop.
pub struct LineWriter<F: Fn(&str)> {
    buf: Vec<u8>,
    emit: F,
}

impl<F: Fn(&str)> LineWriter<F> {
    /// Creates a writer feeding `emit`
    pub fn new(emit: F) -> Self {
        Self {
            buf: Vec::new(),
            emit,
        }
    }

    fn emit_line(&self, bytes: &[u8]) {
        let line = String::from_utf8_lossy(bytes);
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            (self.emit)(line);
        }
    }
}

impl<F: Fn(&str)> fmt::Debug for LineWriter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineWriter")
            .field("buffered", &self.buf.len())
            .finish_non_exhaustive()
    }
}

impl<F: Fn(&str)> Write for LineWriter<F> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        while let Some(end) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=end).collect();
            self.emit_line(&line[..end]);
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let rest = std::mem::take(&mut self.buf);
            self.emit_line(&rest);
        }
        Ok(())
    }
}

impl<F: Fn(&str)> Drop for LineWriter<F> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Plain-text subscriber writing through `make_writer`, without timestamps
/// or ANSI colours
pub fn subscriber<W>(
    make_writer: W,
    max_level: Level,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_max_level(max_level)
        .with_target(false)
        .without_time()
        .finish()
}
