//! Scalar interpolation helpers shared by the operator set.

/// Linear interpolation between `n0` and `n1` at parameter `a`.
#[inline]
pub fn lerp(n0: f32, n1: f32, a: f32) -> f32 {
    n0 + (n1 - n0) * a
}

/// Four-point cubic interpolation.
///
/// Interpolates between `n1` (at `a = 0`) and `n2` (at `a = 1`), with `n0`
/// and `n3` shaping the tangents at the segment endpoints.
#[inline]
pub fn interp_cubic(n0: f32, n1: f32, n2: f32, n3: f32, a: f32) -> f32 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

/// Cubic S-curve easing, maps `[0, 1]` onto `[0, 1]` with zero slope at both ends.
#[inline]
pub fn scurve3(a: f32) -> f32 {
    a * a * (3.0 - 2.0 * a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        approx_eq(lerp(2.0, 6.0, 0.0), 2.0);
        approx_eq(lerp(2.0, 6.0, 1.0), 6.0);
        approx_eq(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn interp_cubic_passes_through_segment_endpoints() {
        approx_eq(interp_cubic(0.0, 1.0, 4.0, 9.0, 0.0), 1.0);
        approx_eq(interp_cubic(0.0, 1.0, 4.0, 9.0, 1.0), 4.0);
    }

    #[test]
    fn scurve3_is_flat_at_the_edges() {
        approx_eq(scurve3(0.0), 0.0);
        approx_eq(scurve3(1.0), 1.0);
        approx_eq(scurve3(0.5), 0.5);
    }
}
