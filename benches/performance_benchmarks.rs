use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vdotrs::grouping::{group_athletes, Athlete};
use vdotrs::splits::IntervalSpec;
use vdotrs::units::Unit;
use vdotrs::zones::Zone;
use vdotrs::{derive_paces, estimate_vdot, paces, project_time, splits};

/// Performance benchmarks for the pace engine
///
/// Every engine call is recomputed on demand by its consumers, so these
/// track the cost of a single call and of roster-wide fan-out.

fn bench_vdot_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("VDOT Model");

    group.bench_function("estimate_vdot", |b| {
        b.iter(|| estimate_vdot(black_box(5000.0), black_box(1200.0)))
    });

    for &distance in &[400.0, 1600.0, 5000.0, 42195.0] {
        group.bench_with_input(
            BenchmarkId::new("project_time", distance as u32),
            &distance,
            |b, &distance| b.iter(|| project_time(black_box(49.8), distance)),
        );
    }

    group.finish();
}

fn bench_pace_derivation(c: &mut Criterion) {
    c.bench_function("derive_paces", |b| b.iter(|| derive_paces(black_box("20:00"))));

    c.bench_function("default_split_matrix", |b| {
        b.iter(|| splits::default_split_matrix(black_box(49.8)))
    });

    c.bench_function("pace_per_mile_all_zones", |b| {
        b.iter(|| {
            Zone::ALL
                .iter()
                .map(|&zone| paces::pace_per_mile(zone, black_box(49.8)))
                .sum::<f64>()
        })
    });
}

fn bench_roster_splits(c: &mut Criterion) {
    let mut group = c.benchmark_group("Roster Splits");
    let interval = IntervalSpec::new(400.0, Unit::Meters, Zone::Cv, 8);

    for &size in &[10, 100, 1000] {
        let roster = create_roster(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("group_and_split", size), &roster, |b, roster| {
            b.iter(|| {
                group_athletes(roster, 5, &[])
                    .iter()
                    .map(|g| g.splits_for(&interval).len())
                    .sum::<usize>()
            })
        });
    }

    group.finish();
}

fn create_roster(size: usize) -> Vec<Athlete> {
    (0..size)
        .map(|i| {
            let vdot = 30.0 + (i % 40) as f64 * 0.75;
            Athlete::new(format!("athlete_{}", i), format!("Athlete {}", i), Some(vdot))
        })
        .collect()
}

criterion_group!(benches, bench_vdot_model, bench_pace_derivation, bench_roster_splits);
criterion_main!(benches);
