use crate::geometry::{BakeKind, Geometry, MeshKind};
use crate::material::MaterialId;
use glam::{Mat4, Vec3};

/// Newtype for mesh identifiers. Assigned by the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// A renderable mesh in the externally-owned scene graph. The baking
/// pipeline mutates only its geometry's occlusion attribute and its
/// material reference; everything else is read-only here.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    pub kind: MeshKind,
    pub geometry: Geometry,
    pub material: MaterialId,
    pub world_transform: Mat4,
    /// Opt-out marker (e.g. foliage scattered on the ground group).
    /// Excluded meshes are never baked, patched, or tracked.
    pub excluded: bool,
}

impl Mesh {
    pub fn new_static(id: MeshId, geometry: Geometry, material: MaterialId) -> Self {
        Self {
            id,
            kind: MeshKind::Static,
            geometry,
            material,
            world_transform: Mat4::IDENTITY,
            excluded: false,
        }
    }

    pub fn new_instanced(id: MeshId, geometry: Geometry, material: MaterialId) -> Self {
        Self {
            id,
            kind: MeshKind::Instanced,
            geometry,
            material,
            world_transform: Mat4::IDENTITY,
            excluded: false,
        }
    }

    /// World-space position of a local-space point.
    pub fn world_position(&self, local: Vec3) -> Vec3 {
        self.world_transform.transform_point3(local)
    }

    /// World-space direction of a local-space normal. Assumes the world
    /// transform has no non-uniform scale (true for city geometry).
    pub fn world_normal(&self, local: Vec3) -> Vec3 {
        self.world_transform
            .transform_vector3(local)
            .normalize_or_zero()
    }

    /// World-space position of one instance's origin.
    pub fn instance_world_position(&self, instance: usize) -> Vec3 {
        let combined = self.world_transform * self.geometry.instance_transforms[instance];
        combined.w_axis.truncate()
    }
}

/// The three mesh groups the pipeline traverses. Ground holds the single
/// static ground plane plus, optionally, an instanced tile mesh.
#[derive(Debug, Default)]
pub struct CityScene {
    pub ground: Vec<Mesh>,
    pub roads: Vec<Mesh>,
    pub buildings: Vec<Mesh>,
}

impl CityScene {
    /// Every mesh paired with the bake strategy its group calls for.
    pub fn iter_groups_mut(&mut self) -> impl Iterator<Item = (BakeKind, &mut Mesh)> {
        self.ground
            .iter_mut()
            .chain(self.roads.iter_mut())
            .map(|m| (BakeKind::Ground, m))
            .chain(self.buildings.iter_mut().map(|m| (BakeKind::Building, m)))
    }

    pub fn iter_meshes_mut(&mut self) -> impl Iterator<Item = &mut Mesh> {
        self.ground
            .iter_mut()
            .chain(self.roads.iter_mut())
            .chain(self.buildings.iter_mut())
    }

    pub fn iter_meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.ground
            .iter()
            .chain(self.roads.iter())
            .chain(self.buildings.iter())
    }

    pub fn find(&self, id: MeshId) -> Option<&Mesh> {
        self.iter_meshes().find(|m| m.id == id)
    }

    pub fn mesh_count(&self) -> usize {
        self.ground.len() + self.roads.len() + self.buildings.len()
    }
}
