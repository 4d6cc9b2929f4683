use std::collections::HashMap;

/// Newtype for material identifiers within a `MaterialStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Live shader inputs for the installed AO stage (16 bytes, uniform-block
/// layout). Updating `intensity` never requires a shader recompile.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AoShaderInputs {
    pub intensity: f32,
    /// Mirrors `AoPatch::debug_view` for the shader; 0 or 1.
    pub debug_view: u32,
    pub _padding: [u32; 2],
}

/// The shader-stage hook installed on a patched material clone: reads the
/// baked occlusion attribute at the fragment stage and scales indirect
/// lighting by it after the built-in ambient-occlusion step.
#[derive(Debug, Clone, PartialEq)]
pub struct AoPatch {
    pub inputs: AoShaderInputs,
    /// Structural flag: changes the shader variant, not just its inputs.
    pub debug_view: bool,
    /// Set when a structural change (debug_view toggle) requires the
    /// host to rebuild the shader program for this material.
    pub needs_recompile: bool,
}

impl AoPatch {
    pub fn new(intensity: f32, debug_view: bool) -> Self {
        Self {
            inputs: AoShaderInputs {
                intensity,
                debug_view: debug_view as u32,
                _padding: [0; 2],
            },
            debug_view,
            needs_recompile: false,
        }
    }
}

/// A physically-based material as seen by the baking pipeline. Only the
/// fields that decide patch eligibility and shader structure are modeled;
/// everything else (textures, tints) rides along in the host's data.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub transparent: bool,
    pub opacity: f32,
    /// Whether the material samples an environment map for indirect
    /// specular; the AO factor is applied there too when set.
    pub env_reflections: bool,
    pub ao_patch: Option<AoPatch>,
}

impl Material {
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transparent: false,
            opacity: 1.0,
            env_reflections: false,
            ao_patch: None,
        }
    }

    /// The "opaque physically-based standard material" contract: only
    /// materials passing this are eligible for AO patching.
    pub fn is_opaque_standard(&self) -> bool {
        !self.transparent && (self.opacity - 1.0).abs() < 1e-3
    }

    /// Cache key for the compiled shader variant. Covers structural flags
    /// only — live inputs like intensity deliberately do not participate,
    /// so intensity edits never force a recompile.
    pub fn shader_cache_key(&self) -> u64 {
        let mut key = 0u64;
        key |= self.transparent as u64;
        key |= (self.env_reflections as u64) << 1;
        if let Some(patch) = &self.ao_patch {
            key |= 1 << 2;
            key |= (patch.debug_view as u64) << 3;
        }
        key
    }
}

/// Id-keyed owner of every material in the scene. Meshes reference
/// materials by `MaterialId`; patched clones live here beside their
/// originals until the effect is disabled.
#[derive(Debug, Default)]
pub struct MaterialStore {
    materials: HashMap<MaterialId, Material>,
    next_id: u32,
}

impl MaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.next_id);
        self.next_id += 1;
        self.materials.insert(id, material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(&id)
    }

    /// Copy-on-write duplicate of an existing material under a fresh id.
    /// The duplicate is independent; mutating it leaves the source
    /// untouched. Returns None for an unknown id.
    pub fn clone_material(&mut self, id: MaterialId) -> Option<MaterialId> {
        let duplicate = self.materials.get(&id)?.clone();
        Some(self.insert(duplicate))
    }

    pub fn remove(&mut self, id: MaterialId) -> Option<Material> {
        self.materials.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
