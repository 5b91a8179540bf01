//! Benchmarking almanac parsing and table assembly
//! on the bundled NAVCEN fixture
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{TimeZone, Utc};
use yuma_tools::app::services::frame_writer::to_dataframe;
use yuma_tools::{AlmanacParser, AlmanacReader, ParseOptions};

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/yumaAlmanac_2024-03-05.alm"
);

fn benchmark(c: &mut Criterion) {
    let content = std::fs::read_to_string(FIXTURE).unwrap();
    // A full constellation is ~32 satellites; repeat the fixture to match
    let constellation = content.repeat(6);
    let epoch = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
    let parser = AlmanacParser::new(ParseOptions::strict(true).with_verbose(false));

    let mut group = c.benchmark_group("parsing");

    group.bench_function("parse/fixture", |b| {
        b.iter(|| parser.parse_str(black_box(&content), Some(epoch)).unwrap())
    });

    group.bench_function("parse/constellation", |b| {
        b.iter(|| parser.parse_str(black_box(&constellation), Some(epoch)).unwrap())
    });

    group.bench_function("read/file", |b| {
        let reader = AlmanacReader::default();
        b.iter(|| reader.try_read(black_box(std::path::Path::new(FIXTURE))).unwrap())
    });

    let table = parser.parse_str(&constellation, Some(epoch)).unwrap();
    group.bench_function("dataframe/constellation", |b| {
        b.iter(|| to_dataframe(black_box(&table)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
