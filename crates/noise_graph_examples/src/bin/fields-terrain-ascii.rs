use std::sync::Arc;

use glam::Vec2;
use noise_graph::prelude::*;
use noise_graph_examples::{noise_source, render_ascii};

/// Builds a small 2D terrain graph: plains and mountains selected by a
/// third noise field, remapped through a curve, and renders it as ASCII.
fn main() -> anyhow::Result<()> {
    let plains: Arc<dyn Module<Vec2>> =
        Arc::new(ScaleBias::<Vec2>::of(noise_source(11, 0.35), 0.25, -0.6));
    let mountains: Arc<dyn Module<Vec2>> = Arc::new(Absolute::<Vec2>::of(noise_source(23, 0.5)));

    // Shared control field: one node referenced by both the select and the
    // final curve, a diamond the per-query cache evaluates only once.
    let control = noise_source(42, 0.12);

    let mut select = Select::of(plains, mountains, control.clone(), 0.0, 1.0);
    select.set_edge_falloff(0.25);

    let relief: Arc<dyn Module<Vec2>> = Arc::new(select);
    let sea_level: Arc<dyn Module<Vec2>> = Arc::new(Constant::new(-0.55));
    let land = Arc::new(Maximum::of(relief, sea_level));

    let mut curve = Curve::of(land);
    curve
        .add_control_point(-1.0, -1.0)?
        .add_control_point(-0.55, -0.9)?
        .add_control_point(-0.2, -0.3)?
        .add_control_point(0.3, 0.4)?
        .add_control_point(1.0, 1.0)?;

    let root: Arc<dyn Module<Vec2>> = Arc::new(curve);
    let (pipeline, root_id) = Compiler::compile(&root, &CompileOptions { dedup_shared: true })?;
    println!(
        "compiled {} elements (root handle {root_id})",
        pipeline.len()
    );

    for line in render_ascii(&pipeline, root_id, Vec2::new(24.0, 16.0), 72, 28) {
        println!("{line}");
    }

    Ok(())
}
