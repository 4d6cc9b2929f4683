use cityao_core::math::clamp01;
use cityao_scene::{AoPatch, Material};
use glam::Vec3;

/// Whether a material may receive the AO hook: inside the
/// opaque-standard contract and not already carrying a patch.
pub fn can_patch(material: &Material) -> bool {
    material.is_opaque_standard() && material.ao_patch.is_none()
}

/// Install the shader-stage AO hook on a material — normally a fresh
/// copy-on-write duplicate from the store, never the original. Returns
/// false for ineligible materials; traversal treats that as a skip,
/// never an error.
pub fn install(material: &mut Material, intensity: f32, debug_view: bool) -> bool {
    if !can_patch(material) {
        return false;
    }
    material.name = format!("{}-ao", material.name);
    material.ao_patch = Some(AoPatch::new(intensity, debug_view));
    true
}

/// Update the live inputs on an already-patched material. Intensity is
/// a plain uniform write; a debug-view change is structural and marks
/// the clone as needing a shader recompile (its cache key moves with
/// it). Returns false when the material carries no patch.
pub fn retint(material: &mut Material, intensity: f32, debug_view: bool) -> bool {
    let Some(patch) = material.ao_patch.as_mut() else {
        return false;
    };
    patch.inputs.intensity = intensity;
    if patch.debug_view != debug_view {
        patch.debug_view = debug_view;
        patch.inputs.debug_view = debug_view as u32;
        patch.needs_recompile = true;
    }
    true
}

/// The occlusion factor the injected stage computes after the built-in
/// ambient-occlusion step.
pub fn indirect_factor(baked: f32, intensity: f32) -> f32 {
    clamp01(1.0 - intensity * (1.0 - clamp01(baked)))
}

/// CPU reference of the patched fragment stage, used by tests and debug
/// tooling. Scales indirect diffuse by the occlusion factor, and
/// indirect specular too when the material samples an environment map.
/// Debug view replaces the lit output with the flat factor.
pub fn shade_indirect(
    material: &Material,
    baked: f32,
    direct: Vec3,
    indirect_diffuse: Vec3,
    indirect_specular: Vec3,
) -> Vec3 {
    let Some(patch) = &material.ao_patch else {
        return direct + indirect_diffuse + indirect_specular;
    };
    let factor = indirect_factor(baked, patch.inputs.intensity);
    if patch.debug_view {
        return Vec3::splat(factor);
    }
    let specular = if material.env_reflections {
        indirect_specular * factor
    } else {
        indirect_specular
    };
    direct + indirect_diffuse * factor + specular
}
