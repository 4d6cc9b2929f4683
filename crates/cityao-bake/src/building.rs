use cityao_core::constants::{
    CORNER_DARKEN_STRENGTH, WALL_MASK_EDGE0, WALL_MASK_EDGE1,
};
use cityao_core::math::{clamp01, smoothstep};
use cityao_core::settings::Quality;
use cityao_scene::{BakeKind, Geometry, Mesh, MeshKind};

/// Bake the building-strategy occlusion attribute: walls darken toward
/// the ground over `wall_height` meters, masked to near-vertical faces
/// so roofs and floors stay lit. At `Quality::High`, sharp corners of
/// indexed meshes get an additional darkening pass.
///
/// Per-vertex only; instanced or empty meshes decline with false.
pub fn bake_building(
    mesh: &mut Mesh,
    ground_y: f32,
    wall_height: f32,
    quality: Quality,
) -> bool {
    if mesh.kind != MeshKind::Static {
        return false;
    }
    let count = mesh.geometry.vertex_count();
    if count == 0 {
        return false;
    }

    let corner_factors = if quality == Quality::High {
        corner_factors(&mesh.geometry)
    } else {
        None
    };

    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let world = mesh.world_position(mesh.geometry.positions[i]);
        let height = world.y - ground_y;
        let wall_ao = smoothstep(0.0, wall_height, height);

        // Concentrate the effect on near-vertical wall faces.
        let wall_weight = mesh
            .geometry
            .normals
            .get(i)
            .map(|&n| {
                1.0 - smoothstep(WALL_MASK_EDGE0, WALL_MASK_EDGE1, mesh.world_normal(n).y.abs())
            })
            .unwrap_or(0.0);

        let mut ao = 1.0 - (1.0 - wall_ao) * wall_weight;
        if let Some(factors) = &corner_factors {
            ao = ao.min(clamp01(1.0 - factors[i] * CORNER_DARKEN_STRENGTH));
        }
        values.push(clamp01(ao));
    }

    mesh.geometry.write_occlusion(values, BakeKind::Building);
    true
}

/// Per-vertex corner factor: the mean, over all triangles touching a
/// vertex, of `1 - dot(vertex_normal, face_normal)`. A high mean means
/// the vertex sits on a sharp edge or corner. Requires indexed triangles
/// and matching normals; otherwise corner darkening is skipped.
fn corner_factors(geometry: &Geometry) -> Option<Vec<f32>> {
    let indices = geometry.indices.as_ref()?;
    let count = geometry.positions.len();
    if geometry.normals.len() != count {
        return None;
    }

    let mut sums = vec![0.0f32; count];
    let mut touches = vec![0u32; count];

    for triangle in indices.chunks_exact(3) {
        let (a, b, c) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        if a >= count || b >= count || c >= count {
            continue; // malformed triangle, skip
        }
        let face_normal = (geometry.positions[b] - geometry.positions[a])
            .cross(geometry.positions[c] - geometry.positions[a])
            .normalize_or_zero();
        for &v in &[a, b, c] {
            sums[v] += 1.0 - geometry.normals[v].dot(face_normal);
            touches[v] += 1;
        }
    }

    Some(
        sums.iter()
            .zip(&touches)
            .map(|(&sum, &n)| if n > 0 { sum / n as f32 } else { 0.0 })
            .collect(),
    )
}
