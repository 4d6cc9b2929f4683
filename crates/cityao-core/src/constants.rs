//! Single source of truth for baking constants shared across the
//! pipeline crates. Falloff edges here are mirrored by the shader
//! stage installed by the material patcher.

/// Minimum ground falloff radius in meters.
pub const RADIUS_MIN_M: f32 = 0.25;

/// Maximum ground falloff radius in meters.
pub const RADIUS_MAX_M: f32 = 32.0;

/// Minimum building wall falloff height in meters.
pub const WALL_HEIGHT_MIN_M: f32 = 0.25;

/// Maximum building wall falloff height in meters.
pub const WALL_HEIGHT_MAX_M: f32 = 12.0;

/// Minimum occlusion intensity (0 = effect fully faded out).
pub const INTENSITY_MIN: f32 = 0.0;

/// Maximum occlusion intensity.
pub const INTENSITY_MAX: f32 = 2.0;

/// Smoothstep edges for the ground "upness" mask: only surfaces whose
/// world normal Y exceeds this band receive full ground occlusion.
pub const UP_MASK_EDGE0: f32 = 0.1;
pub const UP_MASK_EDGE1: f32 = 0.85;

/// Smoothstep edges for the building wall mask: faces whose |normal Y|
/// falls below this band count as walls, above as roofs/floors.
pub const WALL_MASK_EDGE0: f32 = 0.35;
pub const WALL_MASK_EDGE1: f32 = 0.75;

/// Multiplier applied to the per-vertex corner factor before it darkens
/// building edges (high quality only).
pub const CORNER_DARKEN_STRENGTH: f32 = 1.35;

/// Floating-point slack when deciding whether a popped queue entry is
/// stale during the distance-field relaxation.
pub const DISTANCE_SLACK: f32 = 1e-6;
