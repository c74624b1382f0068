#![forbid(unsafe_code)]

//! `tracing` output for the browser console.
//!
//! `tracing-subscriber`'s formatter writes bytes; the console wants whole
//! lines. [`ConsoleWriter`] buffers until a newline and hands each complete
//! line to a sink. Warnings and errors go to the error sink so they show up
//! as console errors.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Receives one formatted log line without its trailing newline.
pub type LineSink = fn(&str);

/// Line-buffering writer produced per event by [`ConsoleMakeWriter`].
#[derive(Debug)]
pub struct ConsoleWriter {
    sink: LineSink,
    pending: Vec<u8>,
}

impl ConsoleWriter {
    #[must_use]
    pub fn new(sink: LineSink) -> Self {
        Self {
            sink,
            pending: Vec::new(),
        }
    }

    fn emit(&mut self, line_end: usize) {
        let line: Vec<u8> = self.pending.drain(..=line_end).collect();
        let text = String::from_utf8_lossy(&line[..line.len() - 1]);
        (self.sink)(text.trim_end_matches('\r'));
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(end) = self.pending.iter().position(|&b| b == b'\n') {
            self.emit(end);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.pending.push(b'\n');
            let end = self.pending.len() - 1;
            self.emit(end);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// [`MakeWriter`] that routes events by level.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMakeWriter {
    log: LineSink,
    error: LineSink,
}

impl ConsoleMakeWriter {
    #[must_use]
    pub const fn new(log: LineSink, error: LineSink) -> Self {
        Self { log, error }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(self.log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if *meta.level() <= Level::WARN {
            ConsoleWriter::new(self.error)
        } else {
            ConsoleWriter::new(self.log)
        }
    }
}

/// Install the global subscriber. Returns `false` if one is already set.
pub fn init(writer: ConsoleMakeWriter, max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(max_level)
        .with_writer(writer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use std::sync::Mutex;

    static LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static ERRORS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn log_sink(line: &str) {
        LOG.lock().unwrap().push(line.to_owned());
    }

    fn error_sink(line: &str) {
        ERRORS.lock().unwrap().push(line.to_owned());
    }

    fn collect(lines: &'static Mutex<Vec<String>>) -> Vec<String> {
        std::mem::take(&mut *lines.lock().unwrap())
    }

    #[test]
    fn writer_emits_whole_lines_only() {
        let mut seen = Vec::new();
        {
            static SPLIT: Mutex<Vec<String>> = Mutex::new(Vec::new());
            fn sink(line: &str) {
                SPLIT.lock().unwrap().push(line.to_owned());
            }
            let mut writer = ConsoleWriter::new(sink);
            writer.write_all(b"first ha").unwrap();
            assert!(SPLIT.lock().unwrap().is_empty());
            writer.write_all(b"lf\r\nsecond\nthird").unwrap();
            seen.extend(collect(&SPLIT));
            assert_eq!(seen, ["first half", "second"]);
            drop(writer);
            seen.extend(collect(&SPLIT));
        }
        assert_eq!(seen, ["first half", "second", "third"]);
    }

    #[test]
    fn subscriber_routes_warnings_to_error_sink() {
        let make = ConsoleMakeWriter::new(log_sink, error_sink);
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(Level::DEBUG)
            .with_writer(make)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(field = "edad", "assist suggestion applied");
            tracing::warn!(error = "offline", "error loading statistics");
        });

        let log = collect(&LOG);
        let errors = collect(&ERRORS);
        assert_eq!(log.len(), 1);
        assert!(log[0].contains("DEBUG"));
        assert!(log[0].contains("field=\"edad\""));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("WARN"));
        assert!(errors[0].contains("error loading statistics"));
    }
}
