use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tandem_core::algorithms::{compute_compatibility, rank_partners};
use tandem_core::parsing::parse;
use tandem_core::presence::{build_schedule, BuildOptions};
use tandem_core::StudentSchedule;

fn document(name: &str, grade: u8) -> Vec<String> {
    format!(
        "000482 08/25/2025 {grade} {name} Grade: {grade}\n\
         Course Title Room Pattern Instructor\n\
         2101-03 Honors Chemistry N204 1.1.1.x.1.1 Bennett, Claire\n\
         2205-01 American Literature S112 2.2.x.2.2.2 Ruiz, Mateo\n\
         2310-01 Precalculus W121 3.3.x.3.3.x Chen, Amelia\n\
         2408-02 World History S220 4.x.4.4.4.x Ibarra, Lucia\n\
         9001-02 Varsity Soccer CC.CC.CC.CC.CC.CC Okafor, Sam\n\
         Second Semester"
    )
    .lines()
    .map(|l| l.to_string())
    .collect()
}

fn student(name: &str, grade: u8) -> StudentSchedule {
    let doc = parse(&document(name, grade)).expect("benchmark document parses");
    build_schedule(&doc.student, doc.grade, &doc.courses, &BuildOptions::default())
}

fn bench_parse_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let lines = document("Harper, Quinn", 11);
    group.bench_function("parse_document", |b| {
        b.iter(|| parse(black_box(&lines)).unwrap());
    });

    let doc = parse(&lines).unwrap();
    group.bench_function("build_schedule", |b| {
        b.iter(|| {
            build_schedule(
                black_box(&doc.student),
                doc.grade,
                black_box(&doc.courses),
                &BuildOptions::default(),
            )
        });
    });

    group.finish();
}

fn bench_compatibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("compatibility");

    let a = student("Harper, Quinn", 11);
    let b = student("Reyes, Dana", 11);
    group.bench_function("pairwise", |bench| {
        bench.iter(|| compute_compatibility(black_box(&a), black_box(&b)));
    });

    for pool_size in [10usize, 100] {
        let pool: Vec<StudentSchedule> = (0..pool_size)
            .map(|i| student(&format!("Candidate {}", i), 10 + (i % 3) as u8))
            .collect();
        group.bench_with_input(
            BenchmarkId::new("rank_partners", pool_size),
            &pool,
            |bench, pool| {
                bench.iter(|| rank_partners(black_box(&a), black_box(pool)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_and_build, bench_compatibility);
criterion_main!(benches);
