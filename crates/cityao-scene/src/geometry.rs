use glam::{Mat4, Vec3};

/// Which bake strategy produced a geometry's occlusion attribute.
/// Diagnostic only; re-baking is always safe and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakeKind {
    Ground,
    Building,
}

/// How a mesh's geometry is replicated in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Static,
    Instanced,
}

/// CPU-side geometry buffers. Positions and normals are in local space;
/// instance transforms are relative to the owning mesh's world transform.
///
/// `occlusion` is the baked scalar attribute: one value per vertex for
/// static meshes, one per instance for instanced meshes, each in [0, 1]
/// with 0 = fully occluded and 1 = fully lit.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Triangle list indices, when the mesh is indexed.
    pub indices: Option<Vec<u32>>,
    pub instance_transforms: Vec<Mat4>,
    pub occlusion: Option<Vec<f32>>,
    pub baked: bool,
    pub bake_kind: Option<BakeKind>,
}

impl Geometry {
    pub fn with_vertices(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        Self {
            positions,
            normals,
            ..Self::default()
        }
    }

    pub fn indexed(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices: Some(indices),
            ..Self::default()
        }
    }

    pub fn with_instances(instance_transforms: Vec<Mat4>) -> Self {
        Self {
            instance_transforms,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instance_transforms.len()
    }

    /// Install a freshly baked occlusion attribute, replacing any
    /// previous bake.
    pub fn write_occlusion(&mut self, values: Vec<f32>, kind: BakeKind) {
        self.occlusion = Some(values);
        self.baked = true;
        self.bake_kind = Some(kind);
    }
}
