pub mod geometry;
pub mod material;
pub mod mesh;

pub use geometry::{BakeKind, Geometry, MeshKind};
pub use material::{AoPatch, AoShaderInputs, Material, MaterialId, MaterialStore};
pub use mesh::{CityScene, Mesh, MeshId};
