use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AimError {
    #[error("Invalid arena: {0}")]
    InvalidArena(String),
    #[error("Invalid bubble at ({x:.1}, {y:.1}): {reason}")]
    InvalidBubble { x: f32, y: f32, reason: String },
    #[error("Trajectory left the arena without terminating")]
    OutOfBounds,
    #[error("No candidate angle produced a valid trajectory")]
    NoValidShot,
}
