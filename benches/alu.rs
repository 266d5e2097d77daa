use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanealu::batch::execute_register;
use lanealu::stimulus::{random_batch, random_lane};
use lanealu::{execute_with, AluControl, AluOp, BatchExecute, ElementWidth, Lane};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ====================================================================================
// --- Configuration ---
// ====================================================================================

/// Batch sizes on both sides of `PARALLEL_THRESHOLD`.
const BATCH_SIZES: &[usize] = &[
    1_024,   // sequential path
    16_384,  // threshold
    262_144, // parallel path
];

/// Operations that exercise each datapath shape once.
const REPRESENTATIVE_OPS: &[AluOp] = &[
    AluOp::Vxor,
    AluOp::Vadc,
    AluOp::Vmsbc,
    AluOp::Vsra,
    AluOp::Vnsra,
    AluOp::Vmerge,
    AluOp::Vmaxu,
    AluOp::Vmsle,
];

// ====================================================================================
// --- Benchmarks ---
// ====================================================================================

/// Single-lane latency per operation and width.
fn single_lane(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("single_lane");

    for &op in REPRESENTATIVE_OPS {
        for width in ElementWidth::ALL {
            let a = random_lane(&mut rng, width);
            let b = random_lane(&mut rng, width);
            let mask = Lane(rng.random());
            let control = AluControl::new(op, width).with_mask_enable(true);

            group.bench_with_input(
                BenchmarkId::new(op.mnemonic(), width),
                &control,
                |bench, control| {
                    bench.iter(|| {
                        execute_with(black_box(a), black_box(b), black_box(mask), control)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Sequential against parallel batch execution of random requests.
fn batches(c: &mut Criterion) {
    for &size in BATCH_SIZES {
        let mut group = c.benchmark_group("batch");
        group.throughput(Throughput::Elements(size as u64));

        let requests = random_batch(&mut StdRng::seed_from_u64(42), size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &requests, |b, r| {
            b.iter(|| black_box(r.execute_all()))
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &requests, |b, r| {
            b.iter(|| black_box(r.par_execute_all()))
        });

        group.finish();
    }
}

/// Whole-register execution through ndarray.
fn registers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let control = AluControl::new(AluOp::Vadd, ElementWidth::E16);

    for &size in BATCH_SIZES {
        let mut group = c.benchmark_group("register");
        group.throughput(Throughput::Bytes(size as u64 * 8));

        let a: Array1<u64> = (0..size).map(|_| rng.random()).collect();
        let b: Array1<u64> = (0..size).map(|_| rng.random()).collect();
        let mask = Array1::<u64>::zeros(size);

        group.bench_function(BenchmarkId::new("vadd.e16", size), |bench| {
            bench.iter(|| {
                execute_register(&control, black_box(a.view()), black_box(b.view()), mask.view())
            })
        });

        group.finish();
    }
}

criterion_group!(benches, single_lane, batches, registers);
criterion_main!(benches);
