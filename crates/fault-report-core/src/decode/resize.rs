//! Working-dimension arithmetic.
//!
//! Every size the re-encoder tries is the source size multiplied by one
//! scale factor, so the aspect ratio never drifts through repeated rounding.

/// Scale factor that caps the longer edge at `max_edge` without upscaling.
///
/// Returns `1.0` when the image already fits, or when either input is zero.
pub fn fit_scale(width: u32, height: u32, max_edge: u32) -> f64 {
    let longest = width.max(height);
    if longest == 0 || max_edge == 0 || longest <= max_edge {
        return 1.0;
    }
    max_edge as f64 / longest as f64
}

/// Apply a uniform scale to source dimensions.
///
/// Both edges are rounded to the nearest pixel and never drop below 1.
pub fn scale_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scaled = |edge: u32| -> u32 {
        let value = (edge as f64 * scale).round();
        if value < 1.0 {
            1
        } else if value > edge as f64 {
            edge.max(1)
        } else {
            value as u32
        }
    };
    (scaled(width), scaled(height))
}
