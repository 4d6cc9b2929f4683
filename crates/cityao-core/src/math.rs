/// Hermite smoothstep between `edge0` and `edge1`. Saturates outside the
/// band, so non-finite inputs (e.g. an unreachable distance sample)
/// resolve to 1.0 without special-casing at call sites.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Clamp a scalar into the [0, 1] occlusion range.
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}
