//! loglab: parse `[YYYY-MM-DD HH:MM:SS] LEVEL: message` log lines and
//! estimate pi by Monte Carlo sampling, serially or across worker threads.
//!
//! The two halves are independent:
//!
//! ```text
//! lines / files ──► parsers::{LineParser, CombinatorParser} ──► Option<LogRecord>
//! sample count  ──► estimator::PiEstimator (serial | worker threads) ──► f64
//! ```

pub mod config_file;
pub mod error;
pub mod estimator;
pub mod parsers;
pub mod record;

pub use error::{ConfigError, Error, Result};
pub use estimator::{estimate, estimate_parallel, EstimatorConfig, PiEstimator};
pub use parsers::{parse_line, CombinatorParser, LineParser, ParserKind, RecordParser};
pub use record::{Level, LogRecord, ScanSummary};
