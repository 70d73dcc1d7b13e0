#![no_main]

use loglab::config_file::validate_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Err(err) = validate_config(text) {
        let line_count = text.split('\n').count();
        assert!(err.line_number() >= 1 && err.line_number() <= line_count);
    }
});
