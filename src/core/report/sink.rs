//! Destinations for rendered report text

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Width of the rule that opens each saved report
pub const RULE_WIDTH: usize = 88;

/// Timestamp format used in saved report headers
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Somewhere a rendered report can be written
pub trait ReportSink {
    /// Write one complete report
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn emit(&mut self, report: &str) -> io::Result<()>;
}

/// Writes reports to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(report.as_bytes())?;
        out.flush()
    }
}

/// Appends each report, under a timestamped header, to a file
#[derive(Debug, Clone)]
pub struct AppendFileSink {
    path: PathBuf,
}

impl AppendFileSink {
    /// Sink appending to `path`; the file is created on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The rule and "generated on" line written before each report
    #[must_use]
    pub fn section_header(timestamp: &str) -> String {
        format!(
            "{}\n\nThis report was generated on: {timestamp}\n",
            "-".repeat(RULE_WIDTH)
        )
    }
}

impl ReportSink for AppendFileSink {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        file.write_all(Self::section_header(&timestamp).as_bytes())?;
        file.write_all(report.as_bytes())?;
        file.flush()
    }
}

/// Sends the same report to several sinks, in order
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl TeeSink {
    /// Empty fan-out
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to the end of the fan-out
    #[must_use]
    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ReportSink for TeeSink {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.emit(report)?;
        }
        Ok(())
    }
}
