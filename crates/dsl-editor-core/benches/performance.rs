use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dsl_editor_core::{DocumentPartitioner, EditLog, EditRecord, StoredRange, TextEdit};
use dsl_editor_core_lang::DslProfile;

fn grammar_source(rule_count: usize) -> String {
    let mut out = String::with_capacity(rule_count * 52);
    for i in 0..rule_count {
        out.push_str(&format!(
            "rule{i:05}: lhs rhs {{ emit({i}); }} // benchmark rule\n"
        ));
    }
    out
}

fn bench_full_scan(c: &mut Criterion) {
    let profile = DslProfile::grammar();
    let text = grammar_source(5_000);
    c.bench_function("full_scan/5k_rules", |b| {
        b.iter(|| {
            let partitioner = DocumentPartitioner::with_text(&profile, black_box(&text));
            black_box(partitioner.partitions().regions().len());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let profile = DslProfile::grammar();
    let text = grammar_source(5_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || DocumentPartitioner::with_text(&profile, &text),
            |mut partitioner| {
                let mut offset = partitioner.text().len_chars() / 2;
                for _ in 0..100 {
                    partitioner.apply_edit(&TextEdit::insert(offset, "x"));
                    offset += 1;
                }
                black_box(partitioner.partitions().regions().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_transform_through_long_log(c: &mut Criterion) {
    let mut log = EditLog::new();
    for i in 0..1_000usize {
        log.record(EditRecord::new(i % 512, i % 3, 2));
    }
    let ranges: Vec<StoredRange> = (0..64).map(|i| StoredRange::new(i * 16, 12)).collect();

    c.bench_function("transform/64_ranges_through_1k_edits", |b| {
        b.iter(|| {
            for range in &ranges {
                black_box(log.transform(black_box(*range)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_full_scan,
    bench_typing_in_middle,
    bench_transform_through_long_log
);
criterion_main!(benches);
