use crate::building::bake_building;
use crate::field::DistanceField;
use crate::ground::bake_ground;
use crate::patch;
use cityao_core::grid::CityMap;
use cityao_core::settings::{AoSettings, BakeKey, MaterialKey};
use cityao_core::FieldError;
use cityao_scene::{BakeKind, CityScene, MaterialId, MaterialStore, MeshId};
use std::collections::HashMap;

/// Diagnostic counters for sync decisions. Handy for asserting that the
/// cheap paths really were cheap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Distance-field rebuilds (bake key or city changed).
    pub field_builds: u32,
    /// Full scene rescans with material patching.
    pub rescans: u32,
    /// Tint-only updates on held clones.
    pub retints: u32,
}

/// Owns the end-to-end lifecycle of the static AO effect: the distance
/// field, the composite cache keys, and the per-instance registries of
/// patched material clones and pre-patch originals.
///
/// Disabled means no meshes tracked and no clones held; `sync` moves
/// between the states from the supplied settings. All registries are
/// owned by this instance and cleared on disable — nothing is global.
pub struct StaticAo {
    field: Option<DistanceField>,
    bake_key: Option<BakeKey>,
    material_key: Option<MaterialKey>,
    city_revision: Option<u64>,
    /// Original material identity -> its single patched clone, shared by
    /// every mesh that referenced the original (copy-on-write).
    clones: HashMap<MaterialId, MaterialId>,
    /// Tracked mesh -> its pre-patch material, for exact restoration.
    originals: HashMap<MeshId, MaterialId>,
    pub stats: SyncStats,
}

impl Default for StaticAo {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticAo {
    pub fn new() -> Self {
        Self {
            field: None,
            bake_key: None,
            material_key: None,
            city_revision: None,
            clones: HashMap::new(),
            originals: HashMap::new(),
            stats: SyncStats::default(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.bake_key.is_some() || !self.originals.is_empty()
    }

    pub fn field(&self) -> Option<&DistanceField> {
        self.field.as_ref()
    }

    pub fn tracked_mesh_count(&self) -> usize {
        self.originals.len()
    }

    pub fn clone_count(&self) -> usize {
        self.clones.len()
    }

    /// Reconcile the effect with the current city and settings. Repeated
    /// calls with unchanged inputs do only key comparisons; a bake-key
    /// change rebuilds the field and re-bakes everything; a material-key
    /// change alone just retints the held clones.
    ///
    /// Errors only propagate from the distance-field preconditions;
    /// ineligible meshes and materials are skipped, not reported.
    pub fn sync(
        &mut self,
        city: &CityMap,
        scene: &mut CityScene,
        materials: &mut MaterialStore,
        settings: Option<&AoSettings>,
    ) -> Result<(), FieldError> {
        // A different city invalidates any previous bake unconditionally.
        if self.city_revision != Some(city.revision) {
            self.bake_key = None;
            self.city_revision = Some(city.revision);
        }

        let Some(settings) = settings.filter(|s| s.enabled()) else {
            self.disable(scene, materials);
            return Ok(());
        };

        let bake_key = settings.bake_key();
        let material_key = settings.material_key();

        let rebuilt = self.bake_key != Some(bake_key);
        if rebuilt {
            let field = DistanceField::build(&city.grid, &city.buildings, settings.quality)?;
            log::info!(
                "rebuilt {}x{} distance field at {:?} quality",
                field.grid().width,
                field.grid().height,
                settings.quality
            );
            bake_scene(scene, &field, city.ground_y(), settings);
            self.field = Some(field);
            self.bake_key = Some(bake_key);
            self.stats.field_builds += 1;
        }

        if rebuilt || self.material_key.is_none() || self.originals.is_empty() {
            self.rescan(scene, materials, settings);
            self.retint_clones(materials, settings);
            self.material_key = Some(material_key);
            self.stats.rescans += 1;
            log::info!(
                "rescanned {} meshes: {} tracked, {} material clones",
                scene.mesh_count(),
                self.originals.len(),
                self.clones.len()
            );
        } else if self.material_key != Some(material_key) {
            self.retint_clones(materials, settings);
            self.material_key = Some(material_key);
            self.stats.retints += 1;
            log::debug!("retinted {} material clones", self.clones.len());
        }

        Ok(())
    }

    /// Restore every tracked mesh's original material, drop the clones,
    /// and clear all cached state. Safe to call when already disabled.
    pub fn dispose(&mut self, scene: &mut CityScene, materials: &mut MaterialStore) {
        self.disable(scene, materials);
    }

    fn disable(&mut self, scene: &mut CityScene, materials: &mut MaterialStore) {
        if !self.enabled() && self.field.is_none() {
            return;
        }
        for mesh in scene.iter_meshes_mut() {
            if let Some(&original) = self.originals.get(&mesh.id) {
                mesh.material = original;
            }
        }
        for &clone in self.clones.values() {
            materials.remove(clone);
        }
        self.originals.clear();
        self.clones.clear();
        self.field = None;
        self.bake_key = None;
        self.material_key = None;
        log::info!("static AO disabled, original materials restored");
    }

    /// Walk every non-excluded mesh carrying a baked attribute, ensure a
    /// patched clone exists for its source material (one per distinct
    /// original), assign it, and remember the original for restoration.
    fn rescan(
        &mut self,
        scene: &mut CityScene,
        materials: &mut MaterialStore,
        settings: &AoSettings,
    ) {
        let intensity = settings.intensity();
        for mesh in scene.iter_meshes_mut() {
            if mesh.excluded || mesh.geometry.occlusion.is_none() {
                continue;
            }
            // Tracked meshes already hold a clone; resolve the true
            // pre-patch original through the registry.
            let original = self.originals.get(&mesh.id).copied().unwrap_or(mesh.material);

            let clone_id = if let Some(&existing) = self.clones.get(&original) {
                existing
            } else {
                if !materials.get(original).is_some_and(patch::can_patch) {
                    continue;
                }
                let Some(id) = materials.clone_material(original) else {
                    continue;
                };
                if let Some(clone) = materials.get_mut(id) {
                    patch::install(clone, intensity, settings.debug_view);
                }
                self.clones.insert(original, id);
                id
            };

            mesh.material = clone_id;
            self.originals.entry(mesh.id).or_insert(original);
        }
    }

    fn retint_clones(&mut self, materials: &mut MaterialStore, settings: &AoSettings) {
        let intensity = settings.intensity();
        for &clone in self.clones.values() {
            if let Some(material) = materials.get_mut(clone) {
                patch::retint(material, intensity, settings.debug_view);
            }
        }
    }
}

/// Re-bake all three mesh groups against a fresh field, honoring the
/// per-mesh exclusion marker.
fn bake_scene(scene: &mut CityScene, field: &DistanceField, ground_y: f32, settings: &AoSettings) {
    let radius = settings.radius();
    let wall_height = settings.wall_height();
    let mut baked = 0usize;
    for (kind, mesh) in scene.iter_groups_mut() {
        if mesh.excluded {
            continue;
        }
        let did_bake = match kind {
            BakeKind::Ground => bake_ground(mesh, field, radius),
            BakeKind::Building => bake_building(mesh, ground_y, wall_height, settings.quality),
        };
        if did_bake {
            baked += 1;
        }
    }
    log::debug!("baked occlusion onto {baked} meshes");
}
