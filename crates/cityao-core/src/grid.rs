use crate::error::FieldError;
use glam::{IVec2, Vec2};

/// Descriptor for the city's tile grid: `width * height` square tiles of
/// `tile_size` meters, with tile (0, 0) centered at `origin` on the XZ
/// plane (grid Y maps to world Z).
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub tile_size: f32,
    pub origin: Vec2,
}

impl TileGrid {
    /// Check the structural preconditions for field construction.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_size.is_nan() || self.tile_size <= 0.0 {
            return Err(FieldError::BadTileSize(self.tile_size));
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0
            && tile.x < self.width as i32
            && tile.y >= 0
            && tile.y < self.height as i32
    }

    /// Row-major index of an in-bounds tile.
    pub fn index(&self, tile: IVec2) -> usize {
        tile.y as usize * self.width as usize + tile.x as usize
    }

    /// Nearest tile to a world-space XZ position (round to nearest center).
    pub fn world_to_tile(&self, world_x: f32, world_z: f32) -> IVec2 {
        IVec2::new(
            ((world_x - self.origin.x) / self.tile_size).round() as i32,
            ((world_z - self.origin.y) / self.tile_size).round() as i32,
        )
    }

    /// World-space XZ center of a tile.
    pub fn tile_center(&self, tile: IVec2) -> Vec2 {
        self.origin + tile.as_vec2() * self.tile_size
    }
}

/// A building footprint: the integer tile coordinates it covers.
/// Out-of-grid tiles are tolerated and ignored by the field builder.
#[derive(Debug, Clone, Default)]
pub struct Building {
    pub tiles: Vec<IVec2>,
}

/// The slice of city data the baking pipeline consumes. Produced by the
/// map/building generators; treated as read-only here.
#[derive(Debug, Clone)]
pub struct CityMap {
    /// Monotonic identity counter. A new revision means a different city
    /// and unconditionally invalidates any stored bake key.
    pub revision: u64,
    pub grid: TileGrid,
    pub buildings: Vec<Building>,
    /// Configured ground surface elevation, if any.
    pub ground_height: Option<f32>,
    /// Fallback elevation when no ground surface is configured.
    pub road_surface_height: Option<f32>,
}

impl CityMap {
    /// Ground elevation used as the building-bake baseline:
    /// ground surface, then road surface, then 0.
    pub fn ground_y(&self) -> f32 {
        self.ground_height.or(self.road_surface_height).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        TileGrid {
            width: 8,
            height: 4,
            tile_size: 2.0,
            origin: Vec2::new(-1.0, 3.0),
        }
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut g = grid();
        g.height = 0;
        assert!(matches!(
            g.validate(),
            Err(FieldError::EmptyGrid { width: 8, height: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_tile_size() {
        let mut g = grid();
        g.tile_size = 0.0;
        assert!(matches!(g.validate(), Err(FieldError::BadTileSize(_))));
        g.tile_size = f32::NAN;
        assert!(matches!(g.validate(), Err(FieldError::BadTileSize(_))));
    }

    #[test]
    fn test_world_tile_roundtrip() {
        let g = grid();
        for tile in [IVec2::new(0, 0), IVec2::new(7, 3), IVec2::new(3, 1)] {
            let center = g.tile_center(tile);
            assert_eq!(g.world_to_tile(center.x, center.y), tile);
        }
    }

    #[test]
    fn test_world_to_tile_rounds_to_nearest() {
        let g = grid();
        // 0.9 meters past the center of tile (0,0) still rounds to it.
        assert_eq!(g.world_to_tile(-0.1, 3.9), IVec2::new(0, 0));
        // Past the halfway line it belongs to the neighbor.
        assert_eq!(g.world_to_tile(0.1, 3.0), IVec2::new(1, 0));
    }

    #[test]
    fn test_contains_bounds() {
        let g = grid();
        assert!(g.contains(IVec2::new(0, 0)));
        assert!(g.contains(IVec2::new(7, 3)));
        assert!(!g.contains(IVec2::new(8, 0)));
        assert!(!g.contains(IVec2::new(0, -1)));
    }

    #[test]
    fn test_ground_y_fallback_chain() {
        let mut city = CityMap {
            revision: 1,
            grid: grid(),
            buildings: Vec::new(),
            ground_height: Some(1.5),
            road_surface_height: Some(0.5),
        };
        assert_eq!(city.ground_y(), 1.5);
        city.ground_height = None;
        assert_eq!(city.ground_y(), 0.5);
        city.road_surface_height = None;
        assert_eq!(city.ground_y(), 0.0);
    }
}
