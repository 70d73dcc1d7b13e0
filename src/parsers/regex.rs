use once_cell::sync::Lazy;
use regex::Regex;

use super::RecordParser;
use crate::record::{Level, LogRecord};

/// Anchored at the start only; the message runs to the first newline.
const LOG_LINE_PATTERN: &str = concat!(
    r"^\[([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\] ",
    r"(INFO|WARN|ERROR|DEBUG): ",
    r"(.*)"
);

static SHARED: Lazy<LineParser> = Lazy::new(LineParser::compile);

/// Regex-backed parser. The pattern is compiled once in [`LineParser::compile`]
/// and reused for every line.
#[derive(Debug, Clone)]
pub struct LineParser {
    regex: Regex,
}

impl LineParser {
    pub fn compile() -> Self {
        Self {
            regex: Regex::new(LOG_LINE_PATTERN).expect("failed to compile log line regex"),
        }
    }

    pub fn new() -> Self {
        Self::compile()
    }

    /// The pattern this parser was compiled from.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::compile()
    }
}

impl RecordParser for LineParser {
    fn parse_line(&self, line: &str) -> Option<LogRecord> {
        let caps = self.regex.captures(line)?;
        let level = caps[2].parse::<Level>().ok()?;
        Some(LogRecord::new(&caps[1], level, &caps[3]))
    }
}

/// Parse one line with a process-wide parser compiled on first use.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    SHARED.parse_line(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, level: Level, message: &str) -> Option<LogRecord> {
        Some(LogRecord::new(ts, level, message))
    }

    #[test]
    fn test_parse_valid_info_log() {
        let parser = LineParser::compile();
        assert_eq!(
            parser.parse_line("[2023-10-27 14:30:05] INFO: User logged in."),
            record("2023-10-27 14:30:05", Level::Info, "User logged in.")
        );
    }

    #[test]
    fn test_parse_valid_warn_log() {
        let parser = LineParser::compile();
        assert_eq!(
            parser.parse_line("[2024-01-15 08:00:10] WARN: Disk space low."),
            record("2024-01-15 08:00:10", Level::Warn, "Disk space low.")
        );
    }

    #[test]
    fn test_parse_valid_error_log() {
        let parser = LineParser::compile();
        assert_eq!(
            parser.parse_line(
                "[2025-05-22 09:14:52] ERROR: Database connection failed. Retrying..."
            ),
            record(
                "2025-05-22 09:14:52",
                Level::Error,
                "Database connection failed. Retrying..."
            )
        );
    }

    #[test]
    fn test_parse_debug_level() {
        let parser = LineParser::compile();
        let parsed = parser
            .parse_line("[2023-10-27 14:30:05] DEBUG: cache warmed")
            .unwrap();
        assert_eq!(parsed.level(), Level::Debug);
    }

    #[test]
    fn test_parse_invalid_format() {
        let parser = LineParser::compile();
        assert_eq!(parser.parse_line("Invalid log line"), None);
        assert_eq!(parser.parse_line("[2023-10-27] INFO: Missing time"), None);
        assert_eq!(
            parser.parse_line("2023-10-27 14:30:05 INFO: No brackets"),
            None
        );
        assert_eq!(
            parser.parse_line("[2023-10-27 14:30:05] HELLO: Unknown level"),
            None
        );
    }

    #[test]
    fn test_parse_empty_line() {
        let parser = LineParser::compile();
        assert_eq!(parser.parse_line(""), None);
        assert_eq!(parser.parse_line("   "), None);
        assert_eq!(parser.parse_line("\t\n"), None);
    }

    #[test]
    fn test_wrong_digit_widths() {
        let parser = LineParser::compile();
        assert_eq!(parser.parse_line("[202-10-27 14:30:05] INFO: x"), None);
        assert_eq!(parser.parse_line("[2023-1-27 14:30:05] INFO: x"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:3:05] INFO: x"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:30:055] INFO: x"), None);
        assert_eq!(parser.parse_line("[20231-10-27 14:30:05] INFO: x"), None);
    }

    #[test]
    fn test_missing_separators() {
        let parser = LineParser::compile();
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05]INFO: x"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05] INFO x"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05] INFO:x"), None);
        assert_eq!(parser.parse_line("[2023-10-27T14:30:05] INFO: x"), None);
    }

    #[test]
    fn test_anchored_at_start() {
        let parser = LineParser::compile();
        assert_eq!(
            parser.parse_line(" [2023-10-27 14:30:05] INFO: leading space"),
            None
        );
        assert_eq!(
            parser.parse_line("prefix [2023-10-27 14:30:05] INFO: embedded"),
            None
        );
    }

    #[test]
    fn test_no_calendar_validation() {
        let parser = LineParser::compile();
        let parsed = parser
            .parse_line("[2023-13-32 25:61:99] INFO: odd date")
            .unwrap();
        assert_eq!(parsed.timestamp(), "2023-13-32 25:61:99");
    }

    #[test]
    fn test_level_is_case_sensitive() {
        let parser = LineParser::compile();
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05] info: lower"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05] Warn: mixed"), None);
        assert_eq!(parser.parse_line("[2023-10-27 14:30:05] INFOX: longer"), None);
    }

    #[test]
    fn test_message_verbatim() {
        let parser = LineParser::compile();
        let parsed = parser
            .parse_line("[2023-10-27 14:30:05] INFO:   padded  message  ")
            .unwrap();
        assert_eq!(parsed.message(), "  padded  message  ");

        let parsed = parser.parse_line("[2023-10-27 14:30:05] WARN: ").unwrap();
        assert_eq!(parsed.message(), "");
    }

    #[test]
    fn test_message_stops_at_newline() {
        let parser = LineParser::compile();
        let parsed = parser
            .parse_line("[2023-10-27 14:30:05] INFO: first\nsecond")
            .unwrap();
        assert_eq!(parsed.message(), "first");
    }

    #[test]
    fn test_shared_parse_line() {
        assert_eq!(
            parse_line("[2023-10-27 14:30:05] INFO: User logged in."),
            record("2023-10-27 14:30:05", Level::Info, "User logged in.")
        );
        assert_eq!(parse_line("Invalid log line"), None);
    }

    #[test]
    fn test_pattern_exposed() {
        let parser = LineParser::compile();
        assert_eq!(parser.pattern(), LOG_LINE_PATTERN);
        assert_eq!(
            parser.pattern(),
            r"^\[([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\] (INFO|WARN|ERROR|DEBUG): (.*)"
        );
        assert_eq!(SHARED.pattern(), LOG_LINE_PATTERN);
    }
}
