use bubblebot_shared::TuningConfig;

use crate::frame::Arena;
use crate::registry::BubbleField;
use crate::trajectory::{PathEnd, TrajectorySample};

/// Scalar value of one simulated shot, plus the bubble it would strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub score: f32,
    pub hit: Option<u32>,
}

/// Score a trajectory against the bubble field. Pure: identical inputs
/// always produce identical scores.
///
/// Misses (ceiling or exhausted) take the configured baseline so a shot
/// can always be issued. Destructible hits combine a hit-count base
/// (lethal bubbles highest, otherwise inversely proportional), an urgency
/// term growing with how low the bubble sits, and a chain bonus per
/// nearby low-hit-count bubble. A zero-hit-count bubble blocks the shot
/// but carries no value.
pub fn evaluate(
    sample: &TrajectorySample,
    arena: &Arena,
    field: &BubbleField,
    cfg: &TuningConfig,
) -> Evaluation {
    let (bubble_id, impact) = match sample.end {
        PathEnd::Hit { bubble, impact } => (bubble, impact),
        PathEnd::Ceiling | PathEnd::Exhausted => {
            return Evaluation {
                score: cfg.miss_score,
                hit: None,
            }
        }
    };

    let bubble = match field.get(bubble_id) {
        Some(b) => b,
        None => {
            return Evaluation {
                score: cfg.miss_score,
                hit: None,
            }
        }
    };

    if bubble.hit_count == 0 {
        return Evaluation {
            score: cfg.miss_score,
            hit: Some(bubble_id),
        };
    }

    let base = if bubble.hit_count == 1 {
        cfg.lethal_bonus
    } else {
        cfg.multi_hit_base / bubble.hit_count as f32
    };

    let urgency = cfg.urgency_weight * arena.depth_of(bubble.center.y);

    let chain_count = field
        .neighbors_within(impact, cfg.chain_radius)
        .filter(|b| b.id != bubble_id && b.hit_count >= 1 && b.hit_count <= cfg.chain_max_hit)
        .count();
    let chain = cfg.chain_weight * chain_count as f32;

    Evaluation {
        score: base + urgency + chain,
        hit: Some(bubble_id),
    }
}
