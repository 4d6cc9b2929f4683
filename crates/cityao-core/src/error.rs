use thiserror::Error;

/// Errors raised while building a distance field. These are structural
/// precondition violations (a malformed tile grid is a config/programmer
/// error, not a runtime condition). Per-mesh bake and per-material patch
/// attempts never error; they decline by returning false/None instead,
/// since scene traversal visits many irrelevant objects.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("tile grid has zero area: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("tile size must be positive, got {0}")]
    BadTileSize(f32),
}
