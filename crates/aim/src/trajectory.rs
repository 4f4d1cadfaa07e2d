use glam::Vec2;

use bubblebot_shared::TuningConfig;

use crate::error::AimError;
use crate::frame::Arena;
use crate::registry::BubbleField;

/// How a simulated trajectory ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEnd {
    /// Reached the ceiling without touching a bubble.
    Ceiling,
    /// Step budget ran out mid-flight; scored as a miss.
    Exhausted,
    /// First bubble intersection along the path.
    Hit { bubble: u32, impact: Vec2 },
}

/// Discretized projectile path for one candidate angle. Built per
/// (angle, arena, field) and dropped after scoring.
#[derive(Debug, Clone)]
pub struct TrajectorySample {
    pub points: Vec<Vec2>,
    pub bounces: u32,
    pub end: PathEnd,
}

impl TrajectorySample {
    /// Where the projectile stopped: the bubble impact, or the last
    /// integrated point for misses.
    pub fn terminal_point(&self) -> Vec2 {
        match self.end {
            PathEnd::Hit { impact, .. } => impact,
            _ => *self.points.last().expect("sample always holds the launch point"),
        }
    }
}

/// Integrate a projectile launched from the shooter at `angle` radians
/// from vertical (0 = straight up, positive = right).
///
/// Per step: gravity is added to the vertical velocity, then position
/// advances by velocity * step_size. Crossing a side wall reflects the
/// horizontal velocity elastically and clamps x to the boundary, so speed
/// magnitude survives any number of bounces. Terminates on the ceiling, a
/// bubble intersection, or step exhaustion; falling out through the
/// bottom is the one non-terminating exit and fails with `OutOfBounds`.
pub fn simulate(
    angle: f32,
    arena: &Arena,
    field: &BubbleField,
    cfg: &TuningConfig,
) -> Result<TrajectorySample, AimError> {
    let mut pos = arena.shooter;
    let mut vel = Vec2::new(
        cfg.launch_speed * angle.sin(),
        -cfg.launch_speed * angle.cos(),
    );
    let mut points = vec![pos];
    let mut bounces = 0u32;

    // A bubble sitting on the muzzle is hit before the first step.
    if let Some(b) = field.intersect(pos, cfg.hit_margin) {
        return Ok(TrajectorySample {
            points,
            bounces,
            end: PathEnd::Hit {
                bubble: b.id,
                impact: pos,
            },
        });
    }

    for _ in 0..cfg.max_steps {
        vel.y += cfg.gravity * cfg.step_size;
        pos += vel * cfg.step_size;

        if pos.x < arena.left {
            pos.x = arena.left;
            vel.x = -vel.x;
            bounces += 1;
        } else if pos.x > arena.right {
            pos.x = arena.right;
            vel.x = -vel.x;
            bounces += 1;
        }

        if pos.y > arena.bottom {
            return Err(AimError::OutOfBounds);
        }

        points.push(pos);

        if pos.y <= arena.top {
            return Ok(TrajectorySample {
                points,
                bounces,
                end: PathEnd::Ceiling,
            });
        }

        if let Some(b) = field.intersect(pos, cfg.hit_margin) {
            let impact = pos;
            return Ok(TrajectorySample {
                points,
                bounces,
                end: PathEnd::Hit {
                    bubble: b.id,
                    impact,
                },
            });
        }
    }

    Ok(TrajectorySample {
        points,
        bounces,
        end: PathEnd::Exhausted,
    })
}
