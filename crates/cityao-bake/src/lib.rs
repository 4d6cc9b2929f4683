//! Static ambient-occlusion baking for a procedurally generated city.
//!
//! A multi-source shortest-path distance field over the tile grid feeds
//! per-vertex/per-instance occlusion baking, which a material patcher
//! then wires into indirect lighting. The `StaticAo` orchestrator owns
//! the cache keys and the enable/disable lifecycle.

pub mod building;
pub mod field;
pub mod ground;
pub mod orchestrator;
pub mod patch;
pub mod queue;

pub use field::DistanceField;
pub use orchestrator::{StaticAo, SyncStats};
pub use queue::MinQueue;
