use criterion::{Criterion, criterion_group, criterion_main};
use dpll_sat::sat::generator::{THREE_SAT_THRESHOLD, pigeonhole, planted_k_sat, random_k_sat};
use dpll_sat::sat::memo::MemoCache;
use dpll_sat::sat::solver::Config;
use dpll_sat::sat::variable_selection::{FixedOrder, JeroslowWang, MostOccurrences, RandomOrder};
use dpll_sat::{Dpll, Problem, SolverConfig};
use std::hint::black_box;
use std::time::Duration;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn threshold_instances(num_vars: usize, count: u64) -> Vec<Problem> {
    let num_clauses = (num_vars as f64 * THREE_SAT_THRESHOLD).round() as usize;
    (0..count)
        .map(|seed| {
            let mut rng = fastrand::Rng::with_seed(seed);
            random_k_sat(num_vars, num_clauses, 3, &mut rng)
                .expect("3 distinct variables are available")
        })
        .collect()
}

fn solve_all<C: SolverConfig>(problems: &[Problem]) {
    for problem in problems {
        let mut solver = Dpll::<C>::new(problem);
        black_box(solver.solve());
    }
}

fn bench_3sat(c: &mut Criterion) {
    let problems = threshold_instances(20, 50);

    let mut group = c.benchmark_group("3sat threshold - heuristic");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("MostOccurrences", |b| {
        b.iter(|| solve_all::<Config<MostOccurrences>>(&problems));
    });
    group.bench_function("FixedOrder", |b| {
        b.iter(|| solve_all::<Config<FixedOrder>>(&problems));
    });
    group.bench_function("JeroslowWang", |b| {
        b.iter(|| solve_all::<Config<JeroslowWang>>(&problems));
    });
    group.bench_function("RandomOrder", |b| {
        b.iter(|| solve_all::<Config<RandomOrder>>(&problems));
    });

    group.finish();
}

fn bench_memo(c: &mut Criterion) {
    let problems = threshold_instances(16, 20);

    let mut group = c.benchmark_group("3sat threshold - memo");
    group.sample_size(30);

    group.bench_function("NoMemo", |b| {
        b.iter(|| solve_all::<Config<MostOccurrences>>(&problems));
    });
    group.bench_function("MemoCache", |b| {
        b.iter(|| solve_all::<Config<MostOccurrences, MemoCache>>(&problems));
    });

    group.finish();
}

fn bench_planted(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(11);
    let (problem, _) = planted_k_sat(60, 240, 3, &mut rng).expect("valid planted instance");

    c.bench_function("planted 60 vars", |b| {
        b.iter(|| {
            let mut solver = Dpll::<Config<JeroslowWang>>::new(&problem);
            black_box(solver.solve());
        });
    });
}

fn bench_pigeonhole(c: &mut Criterion) {
    let problem = pigeonhole(5).expect("small pigeonhole instance");

    let mut group = c.benchmark_group("pigeonhole 5");
    group.sample_size(10);

    group.bench_function("MostOccurrences", |b| {
        b.iter(|| solve_all::<Config<MostOccurrences>>(std::slice::from_ref(&problem)));
    });
    group.bench_function("JeroslowWang", |b| {
        b.iter(|| solve_all::<Config<JeroslowWang>>(std::slice::from_ref(&problem)));
    });

    group.finish();
}

criterion_group!(benches, bench_3sat, bench_memo, bench_planted, bench_pigeonhole);

criterion_main!(benches);
