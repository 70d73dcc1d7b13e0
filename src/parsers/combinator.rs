use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while_m_n},
    character::complete::char,
    combinator::{recognize, value},
    sequence::preceded,
    IResult,
};
use nom::Parser;

use super::RecordParser;
use crate::record::{Level, LogRecord};

/// Parser built from nom combinators. Accepts exactly the lines the regex
/// parser accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinatorParser;

impl CombinatorParser {
    pub fn new() -> Self {
        Self
    }

    fn digits(count: usize) -> impl Fn(&str) -> IResult<&str, &str> {
        move |input| take_while_m_n(count, count, |c: char| c.is_ascii_digit())(input)
    }

    /// `YYYY-MM-DD HH:MM:SS`, digit widths only.
    fn timestamp(input: &str) -> IResult<&str, &str> {
        recognize((
            Self::digits(4),
            char('-'),
            Self::digits(2),
            char('-'),
            Self::digits(2),
            char(' '),
            Self::digits(2),
            char(':'),
            Self::digits(2),
            char(':'),
            Self::digits(2),
        ))
        .parse(input)
    }

    fn level(input: &str) -> IResult<&str, Level> {
        alt((
            value(Level::Info, tag("INFO")),
            value(Level::Warn, tag("WARN")),
            value(Level::Error, tag("ERROR")),
            value(Level::Debug, tag("DEBUG")),
        ))
        .parse(input)
    }

    fn log_line(input: &str) -> IResult<&str, LogRecord> {
        (
            preceded(char('['), Self::timestamp),
            preceded(tag("] "), Self::level),
            preceded(tag(": "), take_till(|c: char| c == '\n')),
        )
            .map(|(timestamp, level, message)| LogRecord::new(timestamp, level, message))
            .parse(input)
    }
}

impl RecordParser for CombinatorParser {
    fn parse_line(&self, line: &str) -> Option<LogRecord> {
        Self::log_line(line).ok().map(|(_, record)| record)
    }
}
