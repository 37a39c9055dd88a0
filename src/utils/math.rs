//! # Game Mathematics
//!
//! Small vector helpers for movement.

/// Normalizes a digital movement intent to a unit vector.
///
/// Diagonal input moves at the same speed as straight input. A zero intent
/// stays zero.
///
/// # Examples
///
/// ```
/// use taleplay::normalize_intent;
///
/// assert_eq!(normalize_intent(1, 0), (1.0, 0.0));
/// assert_eq!(normalize_intent(0, 0), (0.0, 0.0));
///
/// let (x, y) = normalize_intent(1, -1);
/// assert!(((x * x + y * y) - 1.0).abs() < 1e-6);
/// ```
pub fn normalize_intent(move_x: i8, move_y: i8) -> (f32, f32) {
    let x = move_x.signum() as f32;
    let y = move_y.signum() as f32;
    let len = (x * x + y * y).sqrt();
    if len == 0.0 {
        (0.0, 0.0)
    } else {
        (x / len, y / len)
    }
}

/// Clamps a coordinate so a box of `extent` centered on it stays within `0..=limit`.
pub fn clamp_centered(value: f32, extent: f32, limit: f32) -> f32 {
    let half = extent / 2.0;
    if limit <= extent {
        return limit / 2.0;
    }
    value.clamp(half, limit - half)
}
