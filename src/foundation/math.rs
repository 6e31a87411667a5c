/// Clamp a resampled channel value to `[0, 255]` and truncate.
pub(crate) fn clamp_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Round a resampled channel value to the nearest `u8`, saturating at the ends.
pub(crate) fn round_to_u8(v: f32) -> u8 {
    clamp_to_u8(v + 0.5)
}

/// Checked `width * height * bytes_per_pixel`.
pub(crate) fn byte_len(width: usize, height: usize, bytes_per_pixel: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(bytes_per_pixel)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
