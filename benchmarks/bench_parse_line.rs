use std::hint::black_box;
use std::io::{BufWriter, Write};

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::NamedTempFile;

use loglab::{CombinatorParser, LineParser, RecordParser};

const LINE: &str = "[2023-10-27 14:30:05] INFO: User logged in.";
const BAD_LINE: &str = "[2023-10-27 14:30:05] HELLO: Unknown level";
const FILE_RECORDS: usize = 10_000;

fn bench_regex_reused(c: &mut Criterion) {
    let parser = LineParser::compile();
    c.bench_function("regex_reused", |b| {
        b.iter(|| {
            black_box(parser.parse_line(black_box(LINE)));
        });
    });
}

fn bench_regex_compiled_per_call(c: &mut Criterion) {
    c.bench_function("regex_compiled_per_call", |b| {
        b.iter(|| {
            let parser = LineParser::compile();
            black_box(parser.parse_line(black_box(LINE)));
        });
    });
}

fn bench_combinator(c: &mut Criterion) {
    let parser = CombinatorParser::new();
    c.bench_function("combinator", |b| {
        b.iter(|| {
            black_box(parser.parse_line(black_box(LINE)));
        });
    });
}

fn bench_rejects(c: &mut Criterion) {
    let regex = LineParser::compile();
    let combinator = CombinatorParser::new();
    c.bench_function("regex_reject", |b| {
        b.iter(|| {
            black_box(regex.parse_line(black_box(BAD_LINE)));
        });
    });
    c.bench_function("combinator_reject", |b| {
        b.iter(|| {
            black_box(combinator.parse_line(black_box(BAD_LINE)));
        });
    });
}

fn write_log_file() -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    {
        let mut writer = BufWriter::new(file.as_file());
        for _ in 0..FILE_RECORDS {
            writeln!(writer, "{}", LINE).expect("Failed to write log line");
        }
        writer.flush().expect("Failed to flush log file");
    }
    file
}

fn bench_scan_file(c: &mut Criterion) {
    let file = write_log_file();
    let regex = LineParser::compile();
    let combinator = CombinatorParser::new();

    c.bench_function("regex_scan_10k", |b| {
        b.iter(|| {
            black_box(regex.scan_file(file.path()).unwrap());
        });
    });
    c.bench_function("combinator_scan_10k", |b| {
        b.iter(|| {
            black_box(combinator.scan_file(file.path()).unwrap());
        });
    });
    c.bench_function("regex_parse_file_10k", |b| {
        b.iter(|| {
            black_box(regex.parse_file(file.path()).unwrap());
        });
    });
}

criterion_group!(
    parse_line_benches,
    bench_regex_reused,
    bench_regex_compiled_per_call,
    bench_combinator,
    bench_rejects,
    bench_scan_file
);
criterion_main!(parse_line_benches);
