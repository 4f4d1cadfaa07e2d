use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use bubblebot_shared::RawBubble;

use crate::error::AimError;

/// A validated bubble. Ids are assigned in detector order and are stable
/// within the frame only; nothing tracks a bubble across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub hit_count: u32,
}

impl Bubble {
    /// Validate one raw detection. Non-positive radius and negative hit
    /// counts are detector noise, not game state.
    pub fn from_raw(id: u32, raw: &RawBubble) -> Result<Self, AimError> {
        if !(raw.radius > 0.0) {
            return Err(AimError::InvalidBubble {
                x: raw.x,
                y: raw.y,
                reason: format!("non-positive radius {}", raw.radius),
            });
        }
        if raw.hit_count < 0 {
            return Err(AimError::InvalidBubble {
                x: raw.x,
                y: raw.y,
                reason: format!("negative hit count {}", raw.hit_count),
            });
        }
        Ok(Self {
            id,
            center: Vec2::new(raw.x, raw.y),
            radius: raw.radius,
            hit_count: raw.hit_count as u32,
        })
    }
}

/// The set of bubbles detected in one frame, with the collision and
/// neighborhood queries the simulator and evaluator need.
#[derive(Debug, Clone, Default)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new(bubbles: Vec<Bubble>) -> Self {
        Self { bubbles }
    }

    /// Build from raw detections. Malformed bubbles are dropped with a
    /// warning; the rest of the frame stays usable.
    pub fn from_raw(raws: &[RawBubble]) -> Self {
        let mut bubbles = Vec::with_capacity(raws.len());
        for raw in raws {
            match Bubble::from_raw(bubbles.len() as u32, raw) {
                Ok(b) => bubbles.push(b),
                Err(e) => warn!("dropping detector bubble: {}", e),
            }
        }
        Self { bubbles }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    /// The bubble whose surface (inflated by `margin`) contains `point`,
    /// choosing the closest center. Equidistant bubbles tie-break on
    /// lowest hit_count, then lowest id.
    pub fn intersect(&self, point: Vec2, margin: f32) -> Option<&Bubble> {
        let mut best: Option<(f32, &Bubble)> = None;
        for bubble in &self.bubbles {
            let dist = bubble.center.distance(point);
            if dist > bubble.radius + margin {
                continue;
            }
            best = match best {
                None => Some((dist, bubble)),
                Some((best_dist, prev)) => {
                    if dist < best_dist
                        || (dist == best_dist
                            && (bubble.hit_count, bubble.id) < (prev.hit_count, prev.id))
                    {
                        Some((dist, bubble))
                    } else {
                        Some((best_dist, prev))
                    }
                }
            };
        }
        best.map(|(_, b)| b)
    }

    /// Bubbles whose centers lie within `radius` of `point`.
    pub fn neighbors_within(&self, point: Vec2, radius: f32) -> impl Iterator<Item = &Bubble> {
        self.bubbles
            .iter()
            .filter(move |b| b.center.distance_squared(point) <= radius * radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(x: f32, y: f32, radius: f32, hit_count: i32) -> RawBubble {
        RawBubble {
            x,
            y,
            radius,
            hit_count,
        }
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(Bubble::from_raw(0, &raw(10.0, 10.0, 0.0, 1)).is_err());
        assert!(Bubble::from_raw(0, &raw(10.0, 10.0, -5.0, 1)).is_err());
    }

    #[test]
    fn test_rejects_negative_hit_count() {
        let err = Bubble::from_raw(0, &raw(10.0, 10.0, 20.0, -1)).unwrap_err();
        assert!(matches!(err, AimError::InvalidBubble { .. }));
    }

    #[test]
    fn test_from_raw_keeps_valid_bubbles() {
        let field = BubbleField::from_raw(&[
            raw(100.0, 100.0, 20.0, 1),
            raw(200.0, 100.0, -1.0, 1), // dropped
            raw(300.0, 100.0, 20.0, -3), // dropped
            raw(400.0, 100.0, 25.0, 2),
        ]);
        assert_eq!(field.len(), 2);
        // Ids are contiguous over the survivors
        assert!(field.get(0).is_some());
        assert!(field.get(1).is_some());
        assert!(field.get(2).is_none());
    }

    #[test]
    fn test_intersect_miss() {
        let field = BubbleField::from_raw(&[raw(100.0, 100.0, 10.0, 1)]);
        assert!(field.intersect(Vec2::new(200.0, 200.0), 0.0).is_none());
    }

    #[test]
    fn test_intersect_respects_margin() {
        let field = BubbleField::from_raw(&[raw(100.0, 100.0, 10.0, 1)]);
        let probe = Vec2::new(113.0, 100.0); // 13 from center
        assert!(field.intersect(probe, 0.0).is_none());
        assert!(field.intersect(probe, 4.0).is_some());
    }

    #[test]
    fn test_intersect_picks_closest() {
        let field = BubbleField::from_raw(&[
            raw(100.0, 100.0, 30.0, 1),
            raw(130.0, 100.0, 30.0, 1),
        ]);
        let hit = field.intersect(Vec2::new(105.0, 100.0), 0.0).unwrap();
        assert_eq!(hit.id, 0);
    }

    #[test]
    fn test_intersect_tie_break_hit_count_then_id() {
        // Two bubbles equidistant from the probe point
        let field = BubbleField::from_raw(&[
            raw(80.0, 100.0, 30.0, 3),
            raw(120.0, 100.0, 30.0, 1),
        ]);
        let hit = field.intersect(Vec2::new(100.0, 100.0), 0.0).unwrap();
        assert_eq!(hit.id, 1, "lower hit_count wins the tie");

        let field = BubbleField::from_raw(&[
            raw(80.0, 100.0, 30.0, 2),
            raw(120.0, 100.0, 30.0, 2),
        ]);
        let hit = field.intersect(Vec2::new(100.0, 100.0), 0.0).unwrap();
        assert_eq!(hit.id, 0, "equal hit_count falls back to lowest id");
    }

    #[test]
    fn test_neighbors_within() {
        let field = BubbleField::from_raw(&[
            raw(100.0, 100.0, 20.0, 1),
            raw(140.0, 100.0, 20.0, 1),
            raw(300.0, 100.0, 20.0, 1),
        ]);
        let near: Vec<u32> = field
            .neighbors_within(Vec2::new(110.0, 100.0), 60.0)
            .map(|b| b.id)
            .collect();
        assert_eq!(near, vec![0, 1]);
    }
}
