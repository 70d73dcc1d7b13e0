use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Severity token recognised by the line grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "DEBUG")]
    Debug,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Warn, Level::Error, Level::Debug];

    /// The exact upper-case token as it appears in a log line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact upper-case tokens are accepted; `info` or `Warn` are not levels.
impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(Level::Info),
            "WARN" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "DEBUG" => Ok(Level::Debug),
            _ => Err(()),
        }
    }
}

/// One successfully parsed log line.
///
/// Fields hold the captured substrings verbatim: no trimming, no case
/// normalisation. Records compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LogRecord {
    timestamp: String,
    level: Level,
    message: String,
}

impl LogRecord {
    pub fn new(timestamp: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders the record back into `[timestamp] LEVEL: message`.
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}

/// Line counts from a scan that discards the records themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub lines: usize,
    pub matched: usize,
}

impl ScanSummary {
    pub fn unmatched(&self) -> usize {
        self.lines - self.matched
    }

    pub(crate) fn record(&mut self, matched: bool) {
        self.lines += 1;
        if matched {
            self.matched += 1;
        }
    }
}
