use std::sync::Arc;

use noise_graph::prelude::*;
use noise_graph_examples::noise_source;

/// Samples a 1D noise profile twice, raw and remapped through a terracing
/// curve, and prints both as columns with a sparkline.
fn main() -> anyhow::Result<()> {
    let base = noise_source(7, 0.15);

    // Flatten valleys, steepen ridges.
    let mut curve = Curve::<f32>::of(base.clone());
    curve
        .add_control_point(-1.0, -1.0)?
        .add_control_point(-0.4, -0.9)?
        .add_control_point(0.0, -0.2)?
        .add_control_point(0.4, 0.7)?
        .add_control_point(1.0, 1.0)?;

    let raw: Arc<dyn Module<f32>> = base;
    let shaped: Arc<dyn Module<f32>> = Arc::new(curve);

    let (raw_pipeline, raw_root) = Compiler::compile(&raw, &CompileOptions::default())?;
    let (shaped_pipeline, shaped_root) = Compiler::compile(&shaped, &CompileOptions::default())?;

    println!("{:>8} {:>8} {:>8}  profile", "x", "raw", "shaped");
    for i in 0..48 {
        let x = i as f32;
        let raw_value = raw_pipeline.element_value(raw_root, x, None);
        let shaped_value = shaped_pipeline.element_value(shaped_root, x, None);

        let width = (((shaped_value + 1.0) / 2.0).clamp(0.0, 1.0) * 40.0) as usize;
        println!(
            "{x:>8.1} {raw_value:>8.3} {shaped_value:>8.3}  {}",
            "#".repeat(width)
        );
    }

    Ok(())
}
