//! Benchmarks for the optimization pipeline
//!
//! Run with: cargo bench -p alsvid-opt

use alsvid_gf2::Octant;
use alsvid_ir::{Circuit, QubitId};
use alsvid_opt::{PassManager, PassRequest};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// A CNOT/T ladder with recurring parities, the phase-fold sweet spot.
fn ladder(n: u32, rounds: usize) -> Circuit {
    let mut circuit = Circuit::with_wires("ladder", n);
    for round in 0..rounds {
        for i in 0..n - 1 {
            circuit.cnot(QubitId(i), QubitId(i + 1)).unwrap();
            circuit
                .phase(Octant::new((round + i as usize) as i64), QubitId(i + 1))
                .unwrap();
        }
        for i in (0..n - 1).rev() {
            circuit.cnot(QubitId(i), QubitId(i + 1)).unwrap();
        }
    }
    circuit
}

fn bench_phase_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("phase_fold");
    for &n in &[4_u32, 8, 16] {
        let circuit = ladder(n, 6);
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            let pm = PassManager::from_requests(&[PassRequest::PhaseFold]);
            b.iter(|| pm.run(black_box(circuit)).unwrap());
        });
    }
    group.finish();
}

fn bench_full_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_chain");
    for &n in &[4_u32, 8] {
        let circuit = ladder(n, 4);
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            let pm = PassManager::from_requests(&[
                PassRequest::PhaseFold,
                PassRequest::RotationDepthSchedule,
                PassRequest::LinearResynthesize,
                PassRequest::Simplify,
            ]);
            b.iter(|| pm.run(black_box(circuit)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_phase_fold, bench_full_chain);
criterion_main!(benches);
