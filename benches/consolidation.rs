use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use criterion::{Criterion, criterion_group, criterion_main};

use folder_consolidator::consolidate::{ConsolidateOptions, consolidate_folder};
use folder_consolidator::readers::{ReadStrategy, ReaderOptions};

const ROWS: usize = 10_000;

fn bench_root() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("folder-consolidator-bench-{nanos}"))
}

fn write_dataset(folder: &PathBuf) {
    fs::create_dir_all(folder).unwrap();

    let mut csv = String::from("id,name,score\n");
    for i in 0..ROWS {
        writeln!(csv, "{i},row{i},{}.5", i % 100).unwrap();
    }
    fs::write(folder.join("a.csv"), csv).unwrap();

    let mut ndjson = String::new();
    for i in 0..ROWS {
        writeln!(ndjson, "{{\"id\":{i},\"kind\":\"event\"}}").unwrap();
    }
    fs::write(folder.join("b.json"), ndjson).unwrap();
}

fn bench_consolidate_folder(c: &mut Criterion) {
    let root = bench_root();
    let folder = root.join("dataset");
    write_dataset(&folder);
    let artifact = root.join("dataset.json.gz");

    let streaming = ConsolidateOptions::default();
    let batched = ConsolidateOptions {
        reader: ReaderOptions {
            strategy: ReadStrategy::Batched,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut group = c.benchmark_group("consolidate_folder_20k_records");
    group.bench_function("streaming", |b| {
        b.iter(|| consolidate_folder(&folder, &artifact, &streaming).unwrap())
    });
    group.bench_function("batched", |b| {
        b.iter(|| consolidate_folder(&folder, &artifact, &batched).unwrap())
    });
    group.finish();

    fs::remove_dir_all(&root).unwrap();
}

criterion_group!(benches, bench_consolidate_folder);
criterion_main!(benches);
