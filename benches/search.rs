//! Performance benchmarks for schooldir
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use schooldir::directory::{ParseMode, SchoolDirectory, parse_with_report};

const DISTRICTS: &[&str] = &["Khordha", "Puri", "Cuttack", "Ganjam", "Balasore", "Mayurbhanj"];
const BLOCKS: &[&str] = &["Jatni", "Gop", "Banki", "Chatrapur", "Remuna", "Baripada"];
const MANAGEMENT: &[&str] = &["Government", "Private", "Aided"];

/// Registry source with `rows` synthetic schools
fn generate_source(rows: usize) -> String {
    let mut source =
        String::from("district,block,udise_code,school_name,category,area,management\n");

    for i in 0..rows {
        let district = DISTRICTS[i % DISTRICTS.len()];
        let block = BLOCKS[(i / 7) % BLOCKS.len()];
        source.push_str(&format!(
            "{district},{block},{code},{district} School No {i},Primary,Rural,{mgmt}\n",
            code = 21_000_000_000u64 + i as u64,
            mgmt = MANAGEMENT[i % MANAGEMENT.len()],
        ));
    }

    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [1_000, 50_000] {
        let source = generate_source(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &source, |b, s| {
            b.iter(|| SchoolDirectory::new(parse_with_report(black_box(s), ParseMode::Lenient).records))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let directory = SchoolDirectory::parse(&generate_source(50_000));

    let queries = [
        ("district", "puri"),
        ("code_prefix", "210000"),
        // Rare match forces a scan of most of the directory
        ("late_match", "no 49999"),
        ("no_match", "zzzz"),
    ];

    let mut group = c.benchmark_group("search");
    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, &q| {
            b.iter(|| directory.search(black_box(q)))
        });
    }
    group.finish();
}

fn bench_exact_lookup(c: &mut Criterion) {
    let directory = SchoolDirectory::parse(&generate_source(50_000));

    c.bench_function("find_by_exact_code", |b| {
        b.iter(|| directory.find_by_exact_code(black_box("21000025000")))
    });
}

criterion_group!(benches, bench_parse, bench_search, bench_exact_lookup);

criterion_main!(benches);
