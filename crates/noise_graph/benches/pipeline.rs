use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use noise_graph::prelude::*;

/// Builds a diamond chain of the given depth: every layer is a maximum of
/// the previous layer with itself, so the number of paths to the leaf
/// doubles per layer.
fn diamond_chain(depth: usize) -> Arc<dyn Module<f32>> {
    let mut curve = Curve::<f32>::of(Arc::new(Constant::new(0.4)));
    for (input, output) in [(-1.0, -1.0), (-0.5, 0.25), (0.5, 0.75), (1.0, 1.0)] {
        curve
            .add_control_point(input, output)
            .expect("distinct inputs");
    }

    let mut node: Arc<dyn Module<f32>> = Arc::new(curve);
    for _ in 0..depth {
        node = Arc::new(Maximum::of(node.clone(), node));
    }
    node
}

fn evaluate_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/evaluate");

    for depth in [8, 12, 16] {
        let root = diamond_chain(depth);
        let (pipeline, root_id) =
            Compiler::compile(&root, &CompileOptions { dedup_shared: true }).expect("compile ok");

        group.bench_with_input(BenchmarkId::new("uncached", depth), &depth, |b, _| {
            b.iter(|| {
                let value = pipeline.element_value(root_id, black_box(0.0), None);
                black_box(value);
            });
        });

        group.bench_with_input(BenchmarkId::new("cached", depth), &depth, |b, _| {
            let mut cache = pipeline.new_cache();
            b.iter(|| {
                cache.clear();
                let value = pipeline.element_value(root_id, black_box(0.0), Some(&mut cache));
                black_box(value);
            });
        });
    }

    group.finish();
}

fn compile_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/compile");

    for depth in [4, 8, 12] {
        let root = diamond_chain(depth);

        group.bench_with_input(BenchmarkId::new("per_path", depth), &depth, |b, _| {
            b.iter(|| {
                let compiled =
                    Compiler::compile(&root, &CompileOptions::default()).expect("compile ok");
                black_box(compiled.1);
            });
        });

        group.bench_with_input(BenchmarkId::new("dedup", depth), &depth, |b, _| {
            b.iter(|| {
                let compiled = Compiler::compile(&root, &CompileOptions { dedup_shared: true })
                    .expect("compile ok");
                black_box(compiled.1);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, compile_benches, evaluate_benches);
criterion_main!(benches);
