use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use metadata_explorer::models::FieldTable;
use metadata_explorer::query::{CombineMode, TermMatcher, classify};
use metadata_explorer::search::search_table;

/// Generate a synthetic folder table with varied tags
fn generate_table(num_rows: usize) -> FieldTable {
    let tags = ["cat", "dog", "beach", "Paris", "snow", "catnip", "sunset", "family", "garden"];

    let rows = (0..num_rows)
        .map(|i| {
            vec![
                format!("2019/Summer/IMG_{:05}.jpg", i),
                format!("{}, {}", tags[i % tags.len()], tags[(i / 3) % tags.len()]),
                format!("Picture {} near the {}", i, tags[(i / 7) % tags.len()]),
            ]
        })
        .collect();

    FieldTable::from_rows(
        vec!["SourceFile".to_string(), "XMP-dc:Subject".to_string(), "XMP-dc:Title".to_string()],
        rows,
    )
    .expect("SourceFile column present")
}

fn bench_term_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_search");
    let fields = vec!["Subject".to_string(), "Title".to_string()];

    let queries: [(&str, &[&str], CombineMode); 4] = [
        ("whole_word", &["cat"], CombineMode::Any),
        ("literal", &["*nip"], CombineMode::Any),
        ("any_of_three", &["cat", "beach", "snow"], CombineMode::Any),
        ("all_of_two", &["cat", "dog"], CombineMode::All),
    ];

    for size in [1_000, 10_000, 50_000].iter() {
        let table = generate_table(*size);
        group.throughput(Throughput::Elements(*size as u64));

        for (name, terms, mode) in &queries {
            let matcher = TermMatcher::new(&classify::<&str>(terms), *mode).expect("valid query");
            group.bench_with_input(BenchmarkId::new(*name, size), size, |b, _| {
                b.iter(|| black_box(search_table(&table, &fields, &matcher)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_term_search);
criterion_main!(benches);
