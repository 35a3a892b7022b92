use criterion::{criterion_group, criterion_main, Criterion};
use life_engine::{Engine, Topology};

const SEED: u64 = 42;

fn step<const N: usize>(c: &mut Criterion) {
    for topology in [Topology::Bounded, Topology::Torus] {
        let mut engine = Engine::new(N, N, topology).unwrap();
        engine.randomize(Some(SEED));
        c.bench_function(&format!("step_{}_{:?}", N, topology), |b| {
            b.iter(|| engine.step())
        });
    }
}

criterion_group!(benches, step<50>, step<256>);
criterion_main!(benches);
