use crate::field::DistanceField;
use cityao_core::constants::{UP_MASK_EDGE0, UP_MASK_EDGE1};
use cityao_core::math::{clamp01, smoothstep};
use cityao_scene::{BakeKind, Mesh, MeshKind};

/// Bake the ground-strategy occlusion attribute onto a mesh: darker near
/// building footprints, fading to lit over `radius` meters.
///
/// Static meshes get one value per vertex, blended by an upward-normal
/// mask so only up-facing surfaces darken. Instanced meshes get one
/// value per instance from the instance origin, with no normal blend.
///
/// Returns false (skip, not an error) when the mesh lacks the data the
/// strategy needs; traversal visits many irrelevant mesh kinds.
pub fn bake_ground(mesh: &mut Mesh, field: &DistanceField, radius: f32) -> bool {
    match mesh.kind {
        MeshKind::Static => bake_vertices(mesh, field, radius),
        MeshKind::Instanced => bake_instances(mesh, field, radius),
    }
}

fn bake_vertices(mesh: &mut Mesh, field: &DistanceField, radius: f32) -> bool {
    let count = mesh.geometry.vertex_count();
    if count == 0 {
        return false;
    }

    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let world = mesh.world_position(mesh.geometry.positions[i]);
        let distance = field.sample_boundary(world.x, world.z);
        let occlusion = smoothstep(0.0, radius, distance);

        // Mask by how upward-facing the surface is; side and underside
        // faces keep full lighting. A mesh without normals bakes as if
        // fully up-facing.
        let upness = mesh
            .geometry
            .normals
            .get(i)
            .map(|&n| smoothstep(UP_MASK_EDGE0, UP_MASK_EDGE1, mesh.world_normal(n).y))
            .unwrap_or(1.0);

        values.push(clamp01(1.0 - (1.0 - occlusion) * upness));
    }

    mesh.geometry.write_occlusion(values, BakeKind::Ground);
    true
}

fn bake_instances(mesh: &mut Mesh, field: &DistanceField, radius: f32) -> bool {
    let count = mesh.geometry.instance_count();
    if count == 0 {
        return false;
    }

    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let world = mesh.instance_world_position(i);
        let distance = field.sample_boundary(world.x, world.z);
        values.push(clamp01(smoothstep(0.0, radius, distance)));
    }

    mesh.geometry.write_occlusion(values, BakeKind::Ground);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityao_core::grid::{Building, TileGrid};
    use cityao_core::settings::Quality;
    use cityao_scene::{Geometry, MaterialId, MeshId};
    use glam::{IVec2, Mat4, Vec2, Vec3};

    fn field_with_building_at(x: i32, y: i32) -> DistanceField {
        let grid = TileGrid {
            width: 16,
            height: 16,
            tile_size: 1.0,
            origin: Vec2::ZERO,
        };
        let building = Building {
            tiles: vec![IVec2::new(x, y)],
        };
        DistanceField::build(&grid, &[building], Quality::Medium).unwrap()
    }

    fn ground_mesh(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Mesh {
        Mesh::new_static(
            MeshId(0),
            Geometry::with_vertices(positions, normals),
            MaterialId(0),
        )
    }

    #[test]
    fn test_vertex_over_building_is_fully_occluded() {
        let field = field_with_building_at(4, 4);
        let mut mesh = ground_mesh(vec![Vec3::new(4.0, 0.0, 4.0)], vec![Vec3::Y]);
        assert!(bake_ground(&mut mesh, &field, 4.0));
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[0.0][..]));
        assert_eq!(mesh.geometry.bake_kind, Some(BakeKind::Ground));
    }

    #[test]
    fn test_vertex_beyond_radius_is_fully_lit() {
        let field = field_with_building_at(4, 4);
        // 10 tiles out (Chebyshev), boundary distance 9.5 m >> radius 4 m.
        let mut mesh = ground_mesh(vec![Vec3::new(14.0, 0.0, 4.0)], vec![Vec3::Y]);
        assert!(bake_ground(&mut mesh, &field, 4.0));
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[1.0][..]));
    }

    #[test]
    fn test_downward_normal_keeps_full_lighting() {
        let field = field_with_building_at(4, 4);
        let mut mesh = ground_mesh(vec![Vec3::new(4.0, 0.0, 4.0)], vec![Vec3::NEG_Y]);
        assert!(bake_ground(&mut mesh, &field, 4.0));
        // upness = 0, so the occlusion blend is a no-op.
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[1.0][..]));
    }

    #[test]
    fn test_world_transform_is_applied() {
        let field = field_with_building_at(4, 4);
        let mut mesh = ground_mesh(vec![Vec3::ZERO], vec![Vec3::Y]);
        mesh.world_transform = Mat4::from_translation(Vec3::new(4.0, 0.0, 4.0));
        assert!(bake_ground(&mut mesh, &field, 4.0));
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[0.0][..]));
    }

    #[test]
    fn test_instanced_bake_skips_normal_blend() {
        let field = field_with_building_at(4, 4);
        let transforms = vec![
            Mat4::from_translation(Vec3::new(4.0, 0.0, 4.0)),
            Mat4::from_translation(Vec3::new(14.0, 0.0, 4.0)),
        ];
        let mut mesh = Mesh::new_instanced(
            MeshId(1),
            Geometry::with_instances(transforms),
            MaterialId(0),
        );
        assert!(bake_ground(&mut mesh, &field, 4.0));
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_empty_mesh_declines() {
        let field = field_with_building_at(4, 4);
        let mut static_mesh = ground_mesh(vec![], vec![]);
        assert!(!bake_ground(&mut static_mesh, &field, 4.0));
        assert!(!static_mesh.geometry.baked);

        let mut instanced =
            Mesh::new_instanced(MeshId(2), Geometry::with_instances(vec![]), MaterialId(0));
        assert!(!bake_ground(&mut instanced, &field, 4.0));
    }

    #[test]
    fn test_bake_is_idempotent_and_in_range() {
        let field = field_with_building_at(4, 4);
        let positions: Vec<Vec3> = (0..16)
            .map(|i| Vec3::new(i as f32, 0.0, (i % 4) as f32 * 3.0))
            .collect();
        let normals = vec![Vec3::Y; 16];
        let mut mesh = ground_mesh(positions, normals);

        assert!(bake_ground(&mut mesh, &field, 4.0));
        let first = mesh.geometry.occlusion.clone().unwrap();
        assert!(bake_ground(&mut mesh, &field, 4.0));
        let second = mesh.geometry.occlusion.clone().unwrap();

        assert_eq!(first, second);
        for v in &first {
            assert!((0.0..=1.0).contains(v), "out of range: {v}");
        }
    }

    #[test]
    fn test_empty_city_bakes_fully_lit() {
        let grid = TileGrid {
            width: 8,
            height: 8,
            tile_size: 1.0,
            origin: Vec2::ZERO,
        };
        let field = DistanceField::build(&grid, &[], Quality::Medium).unwrap();
        let mut mesh = ground_mesh(vec![Vec3::new(3.0, 0.0, 3.0)], vec![Vec3::Y]);
        assert!(bake_ground(&mut mesh, &field, 4.0));
        // Infinite sample saturates the smoothstep to fully lit.
        assert_eq!(mesh.geometry.occlusion.as_deref(), Some(&[1.0][..]));
    }
}
