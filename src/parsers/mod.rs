//! Line parsers for `[YYYY-MM-DD HH:MM:SS] LEVEL: message` logs.
//!
//! Two implementations of the same grammar live here: [`LineParser`] backed by
//! a regex compiled once at construction, and [`CombinatorParser`] built from
//! nom combinators. Both accept and reject exactly the same lines.

pub mod combinator;
pub mod regex;

pub use self::combinator::CombinatorParser;
pub use self::regex::{parse_line, LineParser};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::{LogRecord, ScanSummary};

/// Classifies single lines as structured records.
///
/// Implementations hold no mutable state after construction, so a parser can
/// be shared by reference across threads.
pub trait RecordParser: Send + Sync {
    /// Match `line` from its first character. Anything that does not fit the
    /// grammar yields `None`; this never fails.
    fn parse_line(&self, line: &str) -> Option<LogRecord>;

    /// Parse every line of `reader`, keeping `None` placeholders for lines
    /// that did not match so the output lines up with the input.
    fn parse_lines(&self, reader: &mut dyn BufRead) -> io::Result<Vec<Option<LogRecord>>> {
        reader
            .lines()
            .map(|line| line.map(|line| self.parse_line(&line)))
            .collect()
    }

    /// Count matching lines without keeping the records.
    fn scan_lines(&self, reader: &mut dyn BufRead) -> io::Result<ScanSummary> {
        let mut summary = ScanSummary::default();
        for line in reader.lines() {
            let line = line?;
            summary.record(self.parse_line(&line).is_some());
        }
        Ok(summary)
    }

    /// Read `path` line by line and parse each line.
    fn parse_file(&self, path: &Path) -> Result<Vec<Option<LogRecord>>> {
        let mut reader = open_reader(path)?;
        let records = self
            .parse_lines(&mut reader)
            .map_err(|e| Error::io(path, e))?;

        tracing::debug!(
            path = %path.display(),
            lines = records.len(),
            matched = records.iter().filter(|r| r.is_some()).count(),
            "parsed log file"
        );
        Ok(records)
    }

    /// Parse every line of `path`, returning only the counts.
    fn scan_file(&self, path: &Path) -> Result<ScanSummary> {
        let mut reader = open_reader(path)?;
        let summary = self
            .scan_lines(&mut reader)
            .map_err(|e| Error::io(path, e))?;

        tracing::debug!(
            path = %path.display(),
            lines = summary.lines,
            matched = summary.matched,
            "scanned log file"
        );
        Ok(summary)
    }
}

fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(BufReader::new(file))
}

/// Parser implementation selectable at runtime.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParserKind {
    #[default]
    Regex,
    Combinator,
}

impl ParserKind {
    pub fn build(self) -> Box<dyn RecordParser> {
        match self {
            ParserKind::Regex => Box::new(LineParser::compile()),
            ParserKind::Combinator => Box::new(CombinatorParser::new()),
        }
    }
}
