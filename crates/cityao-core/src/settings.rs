use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Distance-field quality level. Selects the neighbor/weight scheme used
/// by the shortest-path relaxation and enables corner darkening on
/// buildings at `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

/// Whether the baked-occlusion effect is active at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AoMode {
    Off,
    Baked,
}

/// Host-supplied settings for the static AO pipeline, loadable from RON.
///
/// Raw values are stored verbatim; the clamped accessors are what the
/// pipeline (and the cache keys) actually consume, so an out-of-range
/// slider value cannot poison a bake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AoSettings {
    pub mode: AoMode,
    pub quality: Quality,
    /// Ground falloff radius in meters.
    pub radius: f32,
    /// Building wall falloff height in meters.
    pub wall_height: f32,
    /// Shader-stage occlusion intensity.
    pub intensity: f32,
    /// Replace lit output with the raw occlusion factor.
    pub debug_view: bool,
}

impl Default for AoSettings {
    fn default() -> Self {
        Self {
            mode: AoMode::Baked,
            quality: Quality::Medium,
            radius: 8.0,
            wall_height: 3.0,
            intensity: 1.0,
            debug_view: false,
        }
    }
}

impl AoSettings {
    /// Parse settings from a RON string.
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    pub fn enabled(&self) -> bool {
        self.mode != AoMode::Off
    }

    pub fn radius(&self) -> f32 {
        self.radius.clamp(RADIUS_MIN_M, RADIUS_MAX_M)
    }

    pub fn wall_height(&self) -> f32 {
        self.wall_height.clamp(WALL_HEIGHT_MIN_M, WALL_HEIGHT_MAX_M)
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.clamp(INTENSITY_MIN, INTENSITY_MAX)
    }

    pub fn bake_key(&self) -> BakeKey {
        BakeKey {
            quality: self.quality,
            radius_bits: self.radius().to_bits(),
            wall_height_bits: self.wall_height().to_bits(),
        }
    }

    pub fn material_key(&self) -> MaterialKey {
        MaterialKey {
            intensity_bits: self.intensity().to_bits(),
            debug_view: self.debug_view,
        }
    }
}

/// Composite cache key whose change invalidates the distance field and
/// every baked attribute. Floats are compared bitwise-exact; any real
/// change to a clamped value produces a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BakeKey {
    pub quality: Quality,
    pub radius_bits: u32,
    pub wall_height_bits: u32,
}

/// Composite cache key whose change invalidates only the shader-level
/// tint on already-patched material clones, never geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    pub intensity_bits: u32,
    pub debug_view: bool,
}
