//! Shared helpers for the noise_graph examples: a hash-based value-noise
//! leaf generator and ASCII rendering utilities.
//!
//! The library crate deliberately ships no concrete noise kernels; this
//! crate shows how an external generator plugs into the pipeline by
//! implementing [`Module`] and [`Element`] for 1D and 2D query points.
use std::sync::Arc;

use glam::Vec2;
use noise_graph::prelude::*;

/// Deterministic value-noise leaf generator, output in `[-1, 1]`.
pub struct ValueNoise {
    seed: i32,
    frequency: f32,
}

impl ValueNoise {
    pub fn new(seed: i32, frequency: f32) -> Self {
        Self { seed, frequency }
    }
}

impl Module<f32> for ValueNoise {
    fn name(&self) -> &'static str {
        "value_noise"
    }

    fn compile(&self, ctx: &mut CompileContext<'_, f32>) -> Result<ElementId> {
        Ok(ctx.push(Box::new(ValueNoiseElement {
            seed: self.seed,
            frequency: self.frequency,
        })))
    }
}

impl Module<Vec2> for ValueNoise {
    fn name(&self) -> &'static str {
        "value_noise"
    }

    fn compile(&self, ctx: &mut CompileContext<'_, Vec2>) -> Result<ElementId> {
        Ok(ctx.push(Box::new(ValueNoiseElement {
            seed: self.seed,
            frequency: self.frequency,
        })))
    }
}

struct ValueNoiseElement {
    seed: i32,
    frequency: f32,
}

impl Element<f32> for ValueNoiseElement {
    fn value(&self, _pipeline: &Pipeline<f32>, point: f32, _cache: Option<&mut Cache>) -> f32 {
        value_noise_1d(point * self.frequency, self.seed)
    }
}

impl Element<Vec2> for ValueNoiseElement {
    fn value(&self, _pipeline: &Pipeline<Vec2>, point: Vec2, _cache: Option<&mut Cache>) -> f32 {
        value_noise_2d(point * self.frequency, self.seed)
    }
}

fn hash(mut x: i32) -> i32 {
    x = (x ^ 61) ^ (x >> 16);
    x = x.wrapping_add(x << 3);
    x ^= x >> 4;
    x = x.wrapping_mul(0x27d4_eb2d);
    x ^= x >> 15;
    x
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lattice(x: i32, y: i32, seed: i32) -> f32 {
    let h = hash(seed ^ x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263));
    // [0, 1] from the low 16 bits, then into [-1, 1].
    (h & 0xffff) as f32 / 65535.0 * 2.0 - 1.0
}

/// 1D value noise in `[-1, 1]`.
pub fn value_noise_1d(x: f32, seed: i32) -> f32 {
    let xi = x.floor() as i32;
    let xf = x - xi as f32;
    let u = fade(xf);
    lerp(lattice(xi, 0, seed), lattice(xi + 1, 0, seed), u)
}

/// 2D value noise in `[-1, 1]`.
pub fn value_noise_2d(p: Vec2, seed: i32) -> f32 {
    let xi = p.x.floor() as i32;
    let yi = p.y.floor() as i32;
    let xf = p.x - xi as f32;
    let yf = p.y - yi as f32;

    let u = fade(xf);
    let v = fade(yf);

    let x1 = lerp(lattice(xi, yi, seed), lattice(xi + 1, yi, seed), u);
    let x2 = lerp(lattice(xi, yi + 1, seed), lattice(xi + 1, yi + 1, seed), u);
    lerp(x1, x2, v)
}

/// Maps a value in `[-1, 1]` to an ASCII shading character.
pub fn shade(value: f32) -> char {
    const RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
    let normalized = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
    let index = (normalized * (RAMP.len() - 1) as f32).round() as usize;
    RAMP[index]
}

/// Renders a 2D pipeline over the given extent as lines of ASCII shading.
pub fn render_ascii(
    pipeline: &Pipeline<Vec2>,
    root: ElementId,
    extent: Vec2,
    columns: usize,
    rows: usize,
) -> Vec<String> {
    let mut cache = pipeline.new_cache();
    let mut lines = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut line = String::with_capacity(columns);
        for column in 0..columns {
            let p = Vec2::new(
                (column as f32 + 0.5) / columns as f32 * extent.x,
                (row as f32 + 0.5) / rows as f32 * extent.y,
            );
            cache.clear();
            let value = pipeline.element_value(root, p, Some(&mut cache));
            line.push(shade(value));
        }
        lines.push(line);
    }

    lines
}

/// A value-noise leaf wrapped for use as a graph source.
pub fn noise_source(seed: i32, frequency: f32) -> Arc<ValueNoise> {
    Arc::new(ValueNoise::new(seed, frequency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_noise_is_deterministic_and_bounded() {
        for i in 0..100 {
            let x = i as f32 * 0.37;
            let a = value_noise_1d(x, 7);
            let b = value_noise_1d(x, 7);
            assert_eq!(a, b);
            assert!((-1.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn shade_covers_the_full_ramp() {
        assert_eq!(shade(-1.0), ' ');
        assert_eq!(shade(1.0), '@');
    }
}
