use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nodegrid::NodeCollection;
use rand::prelude::*;
use rand::rngs::StdRng;

fn benchmark_remesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("remesh");
    group.sample_size(10);

    for &size in &[1000usize, 10_000, 100_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let locations: Vec<[f64; 2]> = (0..size)
            .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
            .collect();

        group.bench_with_input(BenchmarkId::new("delete_tenth", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let mut mesh = NodeCollection::<2>::new();
                    mesh.construct_nodes_without_mesh(&locations, 1.0).unwrap();
                    for i in (0..s).step_by(10) {
                        mesh.delete_node(i).unwrap();
                    }
                    mesh
                },
                |mut mesh| mesh.remesh().unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_remesh);
criterion_main!(benches);
