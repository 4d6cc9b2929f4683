pub mod constants;
pub mod error;
pub mod grid;
pub mod math;
pub mod settings;

pub use error::FieldError;
pub use grid::{Building, CityMap, TileGrid};
pub use settings::{AoMode, AoSettings, BakeKey, MaterialKey, Quality};
