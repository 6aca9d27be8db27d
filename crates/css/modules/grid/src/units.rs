//! Saturating arithmetic for layout sizes.
//!
//! Sizes are CSS pixels stored as `f32`. Accumulated sizes never overflow to
//! infinity; they clamp at the largest value representable in the 1/64 px
//! layout unit model.

/// Largest layout size: `i32::MAX` 1/64 px units.
pub const MAX_LAYOUT_SIZE: f32 = 33_554_431.0;

/// Clamp a size to `[-MAX_LAYOUT_SIZE, MAX_LAYOUT_SIZE]`, mapping NaN to zero.
#[inline]
pub fn clamp_layout(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(-MAX_LAYOUT_SIZE, MAX_LAYOUT_SIZE)
}

/// Add two sizes, saturating at the layout bounds.
#[inline]
pub fn saturating_add(lhs: f32, rhs: f32) -> f32 {
    clamp_layout(lhs + rhs)
}

/// Sum sizes with saturation.
pub fn saturating_sum<I>(values: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    values.into_iter().fold(0.0, saturating_add)
}

/// Multiply a per-track size by a track count, saturating.
#[inline]
pub fn saturating_mul(value: f32, count: usize) -> f32 {
    clamp_layout(value * count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if saturation does not clamp at the layout bound.
    #[test]
    fn test_saturating_add_clamps() {
        assert!((saturating_add(MAX_LAYOUT_SIZE, 1000.0) - MAX_LAYOUT_SIZE).abs() < 1.0);
        assert!((saturating_add(10.0, 5.5) - 15.5).abs() < f32::EPSILON);
    }

    /// # Panics
    /// Panics if the sum overflows or NaN leaks through.
    #[test]
    fn test_saturating_sum_and_nan() {
        let total = saturating_sum([f32::MAX, f32::MAX, 1.0]);
        assert!(total.is_finite());
        assert!((clamp_layout(f32::NAN)).abs() < f32::EPSILON);
        assert!((saturating_mul(1e30, 4) - MAX_LAYOUT_SIZE).abs() < 1.0);
    }
}
