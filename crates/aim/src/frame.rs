use glam::Vec2;
use serde::{Deserialize, Serialize};

use bubblebot_shared::RawFrame;

use crate::error::AimError;
use crate::registry::BubbleField;

/// Play-field bounds and shooter origin for one frame. Immutable once
/// built; every round constructs a fresh one from detector output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub shooter: Vec2,
}

impl Arena {
    /// Construct with invariant checks: non-degenerate rectangle, shooter
    /// on or below the bottom edge and inside the horizontal span.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, shooter: Vec2) -> Result<Self, AimError> {
        if !(left < right) {
            return Err(AimError::InvalidArena(format!(
                "left {} must be less than right {}",
                left, right
            )));
        }
        if !(top < bottom) {
            return Err(AimError::InvalidArena(format!(
                "top {} must be less than bottom {}",
                top, bottom
            )));
        }
        if shooter.x < left || shooter.x > right {
            return Err(AimError::InvalidArena(format!(
                "shooter x {} outside [{}, {}]",
                shooter.x, left, right
            )));
        }
        if shooter.y < bottom {
            return Err(AimError::InvalidArena(format!(
                "shooter y {} above the bottom edge {}",
                shooter.y, bottom
            )));
        }
        Ok(Self {
            left,
            right,
            top,
            bottom,
            shooter,
        })
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Normalized vertical position of `y`: 0 at the ceiling, 1 at the
    /// bottom edge. The urgency term in scoring runs on this.
    pub fn depth_of(&self, y: f32) -> f32 {
        ((y - self.top) / self.height()).clamp(0.0, 1.0)
    }
}

/// One validated observation: arena plus bubble field, ready for the
/// controller. This is the only place detector output enters the core.
#[derive(Debug, Clone)]
pub struct Frame {
    pub arena: Arena,
    pub field: BubbleField,
}

impl Frame {
    pub fn from_raw(raw: &RawFrame) -> Result<Self, AimError> {
        let [x, y, w, h] = raw.game_area;
        let arena = Arena::new(x, x + w, y, y + h, raw.shooter_point())?;
        let field = BubbleField::from_raw(&raw.bubbles);
        Ok(Self { arena, field })
    }
}
