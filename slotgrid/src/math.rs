//! Float helpers that work with either `std` or `libm`.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("slotgrid requires either the `std` or the `libm` feature for float math");

#[cfg(feature = "std")]
#[inline]
pub fn floor(x: f32) -> f32 {
    x.floor()
}

#[cfg(feature = "std")]
#[inline]
pub fn ceil(x: f32) -> f32 {
    x.ceil()
}

#[cfg(feature = "std")]
#[inline]
pub fn round(x: f32) -> f32 {
    x.round()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub fn floor(x: f32) -> f32 {
    libm::floorf(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub fn ceil(x: f32) -> f32 {
    libm::ceilf(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub fn round(x: f32) -> f32 {
    libm::roundf(x)
}

/// Floors `x` and converts to `usize`, mapping negatives and NaN to 0.
#[inline]
pub fn floor_to_usize(x: f32) -> usize {
    let f = floor(x);
    if f.is_nan() || f <= 0.0 { 0 } else { f as usize }
}

/// Ceils `x` and converts to `usize`, mapping negatives and NaN to 0.
#[inline]
pub fn ceil_to_usize(x: f32) -> usize {
    let c = ceil(x);
    if c.is_nan() || c <= 0.0 { 0 } else { c as usize }
}

/// Clamps to `[0, 1]`; NaN becomes 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_saturate_at_zero() {
        assert_eq!(floor_to_usize(-3.5), 0);
        assert_eq!(floor_to_usize(f32::NAN), 0);
        assert_eq!(floor_to_usize(2.999), 2);
        assert_eq!(ceil_to_usize(2.001), 3);
        assert_eq!(ceil_to_usize(-0.5), 0);
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
    }
}
