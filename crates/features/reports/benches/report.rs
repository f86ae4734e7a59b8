use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use evreg_kernel::domain::models::Registration;
use evreg_reports::{build_report, render_xlsx};
use serde_json::json;
use std::hint::black_box;

fn registrations(count: usize) -> Vec<Registration> {
    (0..count)
        .map(|i| {
            serde_json::from_value(json!({
                "name": format!("Student {i}"),
                "email": format!("student{i}@campus.edu"),
                "studentId": format!("{i:012}"),
                "gender": if i % 3 == 0 { "male" } else if i % 3 == 1 { "female" } else { "" },
                "events": ["Sports", "Chess"],
                "sports": ["Football", "Tennis"],
            }))
            .unwrap()
        })
        .collect()
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for size in [100usize, 1_000, 10_000] {
        let regs = registrations(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("build_flat", size), &regs, |b, regs| {
            b.iter(|| black_box(build_report(regs, None)));
        });
        group.bench_with_input(BenchmarkId::new("build_sports", size), &regs, |b, regs| {
            b.iter(|| black_box(build_report(regs, Some("sports"))));
        });

        let table = build_report(&regs, Some("sports"));
        group.bench_with_input(BenchmarkId::new("render_xlsx", size), &table, |b, table| {
            b.iter(|| black_box(render_xlsx(table).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_report);
criterion_main!(benches);
