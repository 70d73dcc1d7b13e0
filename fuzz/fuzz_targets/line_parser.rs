#![no_main]

use loglab::{CombinatorParser, Level, LineParser, RecordParser};
use libfuzzer_sys::fuzz_target;

const MAX_LINE_LEN: usize = 2048;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let flags = data[0];
    let structured = flags & 0x1 == 0x1;
    let level_choice = (flags >> 1) & 0x7;

    let seed = match std::str::from_utf8(&data[1..]) {
        Ok(s) => truncate(s, MAX_LINE_LEN),
        Err(_) => return,
    };

    let line = if structured {
        build_structured_line(&seed, level_choice)
    } else {
        seed
    };

    let regex = LineParser::new();
    let combinator = CombinatorParser::new();

    let from_regex = regex.parse_line(&line);
    let from_combinator = combinator.parse_line(&line);
    assert_eq!(from_regex, from_combinator, "parsers disagree on {:?}", line);

    if let Some(record) = from_regex {
        // A rendered record must parse back to itself.
        let rendered = record.to_string();
        assert_eq!(regex.parse_line(&rendered).as_ref(), Some(&record));
    }
});

/// Splice fuzz text into the fixed frame so most inputs reach the message.
fn build_structured_line(seed: &str, level_choice: u8) -> String {
    let digits: String = seed
        .chars()
        .filter(|c| c.is_ascii_digit())
        .chain("00000000000000".chars())
        .take(14)
        .collect();
    let level = match Level::ALL.get(level_choice as usize) {
        Some(level) => level.as_str().to_string(),
        None => seed.chars().take(5).collect(),
    };

    format!(
        "[{}-{}-{} {}:{}:{}] {}: {}",
        &digits[0..4],
        &digits[4..6],
        &digits[6..8],
        &digits[8..10],
        &digits[10..12],
        &digits[12..14],
        level,
        seed
    )
}

fn truncate(input: &str, max_len: usize) -> String {
    input.chars().take(max_len).collect()
}
