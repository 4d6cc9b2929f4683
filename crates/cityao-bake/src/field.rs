use crate::queue::MinQueue;
use cityao_core::constants::DISTANCE_SLACK;
use cityao_core::grid::{Building, TileGrid};
use cityao_core::settings::Quality;
use cityao_core::FieldError;
use glam::{IVec2, Vec2};
use std::f32::consts::SQRT_2;

const NEIGHBORS_4: [(i32, i32, f32); 4] = [(1, 0, 1.0), (-1, 0, 1.0), (0, 1, 1.0), (0, -1, 1.0)];

const NEIGHBORS_8_UNIFORM: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, 1.0),
    (1, -1, 1.0),
    (-1, 1, 1.0),
    (-1, -1, 1.0),
];

const NEIGHBORS_8_EUCLIDEAN: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (-1, -1, SQRT_2),
];

/// Per-tile shortest grid-distance to the nearest building-occupied
/// tile, in tile units. Built once per bake key and immutable after;
/// a key change discards and rebuilds it wholesale. Keeps a copy of the
/// grid it was built over, so sampling shares the grid's world/tile
/// conversions.
#[derive(Debug, Clone)]
pub struct DistanceField {
    grid: TileGrid,
    quality: Quality,
    distances: Vec<f32>,
}

impl DistanceField {
    /// Build the field by multi-source shortest path over the tile grid.
    /// Every in-bounds building tile is seeded at distance 0; relaxation
    /// uses the neighbor/weight scheme selected by `quality`. Tiles
    /// unreachable from any building (or all tiles, when there are no
    /// buildings) stay at +infinity.
    ///
    /// Errors only on structural grid preconditions; an empty building
    /// list is a valid city.
    pub fn build(
        grid: &TileGrid,
        buildings: &[Building],
        quality: Quality,
    ) -> Result<Self, FieldError> {
        grid.validate()?;

        let mut distances = vec![f32::INFINITY; grid.tile_count()];
        let mut queue = MinQueue::with_capacity(grid.tile_count());

        for building in buildings {
            for &tile in &building.tiles {
                if !grid.contains(tile) {
                    continue;
                }
                let index = grid.index(tile);
                if distances[index] != 0.0 {
                    distances[index] = 0.0;
                    queue.push(index, 0.0);
                }
            }
        }

        let scheme = Self::neighbor_scheme(quality);
        let width = grid.width as i32;

        while let Some((index, distance)) = queue.pop() {
            // Lazy deletion: a better entry for this tile was already
            // processed, so this pop is stale.
            if distance > distances[index] + DISTANCE_SLACK {
                continue;
            }
            let tile = IVec2::new(index as i32 % width, index as i32 / width);
            for &(dx, dy, weight) in scheme {
                let neighbor = tile + IVec2::new(dx, dy);
                if !grid.contains(neighbor) {
                    continue;
                }
                let neighbor_index = grid.index(neighbor);
                let candidate = distance + weight;
                if candidate < distances[neighbor_index] {
                    distances[neighbor_index] = candidate;
                    queue.push(neighbor_index, candidate);
                }
            }
        }

        Ok(Self {
            grid: grid.clone(),
            quality,
            distances,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    fn neighbor_scheme(quality: Quality) -> &'static [(i32, i32, f32)] {
        match quality {
            Quality::Low => &NEIGHBORS_4,
            Quality::Medium => &NEIGHBORS_8_UNIFORM,
            Quality::High => &NEIGHBORS_8_EUCLIDEAN,
        }
    }

    /// Raw per-tile distance in tile units, +infinity out of bounds.
    pub fn tile_distance(&self, tile: IVec2) -> f32 {
        if !self.grid.contains(tile) {
            return f32::INFINITY;
        }
        self.distances[self.grid.index(tile)]
    }

    /// Distance in meters from a world-space XZ position to the nearest
    /// building tile center. Pure query: out-of-grid or unreachable
    /// positions return +infinity, which downstream smoothsteps saturate
    /// to "fully lit".
    pub fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        let tile = self.grid.world_to_tile(world_x, world_z);
        let distance = self.tile_distance(tile);
        if !distance.is_finite() {
            return f32::INFINITY;
        }
        distance * self.grid.tile_size
    }

    /// Approximate distance to the footprint's edge rather than the tile
    /// center: `max(0, sample - tile_size / 2)`.
    pub fn sample_boundary(&self, world_x: f32, world_z: f32) -> f32 {
        (self.sample(world_x, world_z) - self.grid.tile_size * 0.5).max(0.0)
    }
}
