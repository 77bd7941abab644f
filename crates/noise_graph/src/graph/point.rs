//! Query-point abstraction over the supported dimensionalities.
//!
//! A noise field is evaluated at a point in 1, 2 or 3 dimensions. Instead of
//! three parallel pipeline implementations, every graph type is generic over
//! [`Point`]: `f32` for 1D, [`glam::Vec2`] for 2D and [`glam::Vec3`] for 3D.
use glam::{Vec2, Vec3};

/// A query point in the noise field's coordinate space.
///
/// Transform operators reparameterize points per axis, so the trait exposes
/// component-wise translation and scaling rather than general vector math.
pub trait Point: Copy + Send + Sync + 'static {
    /// Number of coordinate axes.
    const DIMENSIONS: usize;
    /// Point with every component zero.
    const ZERO: Self;
    /// Point with every component one.
    const ONE: Self;

    /// Shifts every component by the matching component of `offset`.
    fn translated(self, offset: Self) -> Self;
    /// Multiplies every component by the matching component of `factor`.
    fn scaled(self, factor: Self) -> Self;
}

impl Point for f32 {
    const DIMENSIONS: usize = 1;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn translated(self, offset: Self) -> Self {
        self + offset
    }

    #[inline]
    fn scaled(self, factor: Self) -> Self {
        self * factor
    }
}

impl Point for Vec2 {
    const DIMENSIONS: usize = 2;
    const ZERO: Self = Vec2::ZERO;
    const ONE: Self = Vec2::ONE;

    #[inline]
    fn translated(self, offset: Self) -> Self {
        self + offset
    }

    #[inline]
    fn scaled(self, factor: Self) -> Self {
        self * factor
    }
}

impl Point for Vec3 {
    const DIMENSIONS: usize = 3;
    const ZERO: Self = Vec3::ZERO;
    const ONE: Self = Vec3::ONE;

    #[inline]
    fn translated(self, offset: Self) -> Self {
        self + offset
    }

    #[inline]
    fn scaled(self, factor: Self) -> Self {
        self * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_shifts_each_axis() {
        assert_eq!(2.0_f32.translated(3.0), 5.0);
        assert_eq!(
            Vec2::new(1.0, 2.0).translated(Vec2::new(10.0, 20.0)),
            Vec2::new(11.0, 22.0)
        );
        assert_eq!(
            Vec3::new(1.0, 2.0, 3.0).translated(Vec3::splat(1.0)),
            Vec3::new(2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn scaled_multiplies_each_axis() {
        assert_eq!(2.0_f32.scaled(4.0), 8.0);
        assert_eq!(
            Vec3::new(1.0, 2.0, 3.0).scaled(Vec3::new(2.0, 3.0, 4.0)),
            Vec3::new(2.0, 6.0, 12.0)
        );
    }
}
