use serde::Serialize;

use crate::controller::Sweep;
use crate::registry::BubbleField;

/// Aggregate quality metrics for one round's angle sweep. These drive the
/// tuning tooling; the control loop itself only needs the decision.
#[derive(Debug, Clone, Serialize)]
pub struct SweepMetrics {
    /// Candidate angles that produced a trajectory.
    pub candidates: u32,
    /// Angles whose trajectory left the arena.
    pub failed: u32,
    /// Fraction of candidates striking any bubble.
    pub hit_fraction: f32,
    /// Fraction of candidates striking a one-hit bubble.
    pub lethal_fraction: f32,
    pub best_score: f32,
    pub mean_score: f32,
    /// Standard deviation of candidate scores.
    pub score_spread: f32,
}

/// Compute sweep metrics against the field the sweep ran on.
pub fn analyze(sweep: &Sweep, field: &BubbleField) -> SweepMetrics {
    let n = sweep.candidates.len();
    if n == 0 {
        return SweepMetrics {
            candidates: 0,
            failed: sweep.failed,
            hit_fraction: 0.0,
            lethal_fraction: 0.0,
            best_score: 0.0,
            mean_score: 0.0,
            score_spread: 0.0,
        };
    }

    let mut hits = 0u32;
    let mut lethal = 0u32;
    let mut best = f32::MIN;
    let mut sum = 0.0f32;
    let mut sq_sum = 0.0f32;

    for c in &sweep.candidates {
        if let Some(id) = c.target {
            hits += 1;
            if field.get(id).is_some_and(|b| b.hit_count == 1) {
                lethal += 1;
            }
        }
        if c.score > best {
            best = c.score;
        }
        sum += c.score;
        sq_sum += c.score * c.score;
    }

    let nf = n as f32;
    let mean = sum / nf;
    let spread = (sq_sum / nf - mean * mean).max(0.0).sqrt();

    SweepMetrics {
        candidates: n as u32,
        failed: sweep.failed,
        hit_fraction: hits as f32 / nf,
        lethal_fraction: lethal as f32 / nf,
        best_score: best,
        mean_score: mean,
        score_spread: spread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{sweep, ShotCandidate};
    use crate::frame::Arena;
    use bubblebot_shared::{RawBubble, TuningConfig};
    use glam::Vec2;

    #[test]
    fn test_metrics_on_real_sweep() {
        let arena = Arena::new(0.0, 100.0, 0.0, 200.0, Vec2::new(50.0, 200.0)).unwrap();
        let field = BubbleField::from_raw(&[RawBubble {
            x: 50.0,
            y: 50.0,
            radius: 10.0,
            hit_count: 1,
        }]);
        let cfg = TuningConfig::default();
        let s = sweep(&arena, &field, &cfg).unwrap();
        let m = analyze(&s, &field);

        assert_eq!(m.candidates as usize, s.candidates.len());
        assert!(m.hit_fraction > 0.0, "the overhead bubble is reachable");
        assert!(m.hit_fraction <= 1.0);
        assert_eq!(m.hit_fraction, m.lethal_fraction, "every hit here is lethal");
        assert!(m.best_score > cfg.miss_score);
        assert!(m.best_score >= m.mean_score);
    }

    #[test]
    fn test_metrics_all_misses() {
        let field = BubbleField::default();
        let s = Sweep {
            candidates: vec![
                ShotCandidate { angle: 0.0, score: 0.0, target: None, impact: Vec2::ZERO },
                ShotCandidate { angle: 0.1, score: 0.0, target: None, impact: Vec2::ZERO },
            ],
            failed: 3,
        };
        let m = analyze(&s, &field);
        assert_eq!(m.failed, 3);
        assert_eq!(m.hit_fraction, 0.0);
        assert_eq!(m.lethal_fraction, 0.0);
        assert!(m.score_spread.abs() < 1e-6);
    }
}
