// benches/stencil.rs
//
// Throughput of one stencil step per executor.
// Run with: cargo bench --bench stencil

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use heat_sim::exec::{Serial, ThreadPoolExecutor};
use heat_sim::mms::initial_value;
use heat_sim::params::ProblemParams;
use heat_sim::scalar_field::ScalarField2D;
use heat_sim::stencil::{StencilCoeffs, solve};

fn bench_stencil(c: &mut Criterion) {
    let mut group = c.benchmark_group("stencil_step");
    let pool = ThreadPoolExecutor::new(0).expect("thread pool");

    for n in [256usize, 1024] {
        let p = ProblemParams::new(n, 20).expect("valid params");
        let coeffs = StencilCoeffs::from_params(&p);
        let mut u = ScalarField2D::new(p.grid());
        initial_value(&Serial, p.length, &mut u);
        let mut u_tmp = ScalarField2D::new(p.grid());

        // Two grids touched per step
        group.throughput(Throughput::Bytes((2 * n * n * std::mem::size_of::<f64>()) as u64));

        group.bench_with_input(BenchmarkId::new("serial", n), &n, |b, _| {
            b.iter(|| solve(&Serial, coeffs, black_box(&u), &mut u_tmp))
        });
        group.bench_with_input(BenchmarkId::new("thread_pool", n), &n, |b, _| {
            b.iter(|| solve(&pool, coeffs, black_box(&u), &mut u_tmp))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stencil);
criterion_main!(benches);
