use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use bubblebot_shared::{Decision, TuningConfig};

use crate::error::AimError;
use crate::evaluator::evaluate;
use crate::frame::Arena;
use crate::registry::BubbleField;
use crate::trajectory::simulate;

/// One scored candidate angle out of the sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotCandidate {
    pub angle: f32,
    pub score: f32,
    pub target: Option<u32>,
    pub impact: Vec2,
}

/// All candidates of one round, plus the count of angles whose
/// trajectory left the arena.
#[derive(Debug, Clone, Serialize)]
pub struct Sweep {
    pub candidates: Vec<ShotCandidate>,
    pub failed: u32,
}

/// Candidate angles ordered by magnitude: 0, +s, -s, +2s, -2s, ... out to
/// the sweep limit. The strict-improvement selection below then keeps the
/// straightest shot on score ties.
fn sweep_angles(cfg: &TuningConfig) -> Vec<f32> {
    let mut angles = vec![0.0f32];
    if cfg.sweep_step > 0.0 {
        let mut k = 1u32;
        loop {
            let a = k as f32 * cfg.sweep_step;
            if a > cfg.sweep_limit + 1e-6 {
                break;
            }
            angles.push(a);
            angles.push(-a);
            k += 1;
        }
    }
    angles
}

/// Simulate and score every candidate angle. Out-of-bounds candidates are
/// skipped and counted; if every angle fails the arena is unusable and
/// the round fails with `NoValidShot`.
pub fn sweep(
    arena: &Arena,
    field: &BubbleField,
    cfg: &TuningConfig,
) -> Result<Sweep, AimError> {
    let mut candidates = Vec::new();
    let mut failed = 0u32;

    for angle in sweep_angles(cfg) {
        match simulate(angle, arena, field, cfg) {
            Ok(sample) => {
                let eval = evaluate(&sample, arena, field, cfg);
                candidates.push(ShotCandidate {
                    angle,
                    score: eval.score,
                    target: eval.hit,
                    impact: sample.terminal_point(),
                });
            }
            Err(AimError::OutOfBounds) => failed += 1,
            Err(e) => return Err(e),
        }
    }

    if candidates.is_empty() {
        return Err(AimError::NoValidShot);
    }
    Ok(Sweep { candidates, failed })
}

/// Highest-scoring candidate. Candidates arrive ordered by |angle|, so
/// strict comparison resolves ties toward the straighter shot.
pub fn best(sweep: &Sweep) -> &ShotCandidate {
    let mut best = &sweep.candidates[0];
    for c in &sweep.candidates[1..] {
        if c.score > best.score {
            best = c;
        }
    }
    best
}

/// Map a launch angle to the cursor position the automation layer should
/// click: a fixed distance out from the shooter along the launch ray.
pub fn aim_point_for(arena: &Arena, angle: f32, cfg: &TuningConfig) -> Vec2 {
    arena.shooter + cfg.aim_distance * Vec2::new(angle.sin(), -angle.cos())
}

/// Pick the shot for one round. An empty field aims straight up rather
/// than erroring, so the control loop never stalls on a blank frame.
pub fn choose_shot(
    arena: &Arena,
    field: &BubbleField,
    cfg: &TuningConfig,
) -> Result<Decision, AimError> {
    if field.is_empty() {
        debug!("empty field, aiming straight up");
        return Ok(Decision {
            aim_point: aim_point_for(arena, 0.0, cfg),
        });
    }

    let sweep = sweep(arena, field, cfg)?;
    let chosen = best(&sweep);
    debug!(
        "chose angle {:.3} rad, score {:.1}, target {:?} ({} candidates, {} failed)",
        chosen.angle,
        chosen.score,
        chosen.target,
        sweep.candidates.len(),
        sweep.failed
    );

    Ok(Decision {
        aim_point: aim_point_for(arena, chosen.angle, cfg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubblebot_shared::RawBubble;

    fn arena() -> Arena {
        Arena::new(0.0, 100.0, 0.0, 200.0, Vec2::new(50.0, 200.0)).unwrap()
    }

    #[test]
    fn test_sweep_angles_ordered_by_magnitude() {
        let cfg = TuningConfig::default();
        let angles = sweep_angles(&cfg);
        assert_eq!(angles[0], 0.0);
        for pair in angles.windows(2) {
            assert!(pair[0].abs() <= pair[1].abs() + 1e-6);
        }
        let max = angles.iter().fold(0.0f32, |m, a| m.max(a.abs()));
        assert!(max <= cfg.sweep_limit + 1e-6);
        assert!(angles.len() > 20, "default sweep covers a real spread");
    }

    #[test]
    fn test_empty_field_aims_straight_up() {
        let cfg = TuningConfig::default();
        let decision = choose_shot(&arena(), &BubbleField::default(), &cfg).unwrap();
        assert!((decision.aim_point.x - 50.0).abs() < 1e-3);
        assert!((decision.aim_point.y - (200.0 - cfg.aim_distance)).abs() < 1e-3);
    }

    #[test]
    fn test_bubble_overhead_is_chosen() {
        let cfg = TuningConfig::default();
        let field = BubbleField::from_raw(&[RawBubble {
            x: 50.0,
            y: 50.0,
            radius: 10.0,
            hit_count: 1,
        }]);
        let arena = arena();

        let sweep = sweep(&arena, &field, &cfg).unwrap();
        let chosen = best(&sweep);
        assert_eq!(chosen.target, Some(0));
        assert!(
            chosen.score > cfg.miss_score,
            "a direct lethal hit must beat the miss baseline"
        );
        // Tie-break: the straight shot wins over equally-scored neighbors
        assert!((chosen.angle - 0.0).abs() < 1e-6);

        let decision = choose_shot(&arena, &field, &cfg).unwrap();
        assert!((decision.aim_point.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_all_candidates_failing_is_no_valid_shot() {
        // Weak launch under crushing gravity: every angle falls out the
        // bottom before reaching anything.
        let cfg = TuningConfig {
            launch_speed: 50.0,
            gravity: 5000.0,
            max_steps: 10_000,
            ..Default::default()
        };
        let field = BubbleField::from_raw(&[RawBubble {
            x: 50.0,
            y: 10.0,
            radius: 5.0,
            hit_count: 1,
        }]);
        let err = choose_shot(&arena(), &field, &cfg).unwrap_err();
        assert_eq!(err, AimError::NoValidShot);
    }

    #[test]
    fn test_partial_failures_still_produce_a_sweep() {
        // Medium gravity: straight shots reach the ceiling, wide shots
        // arc over and drop out the bottom.
        let cfg = TuningConfig {
            gravity: 500.0,
            ..Default::default()
        };
        let sweep = sweep(&arena(), &BubbleField::default(), &cfg).unwrap();
        assert!(sweep.failed > 0, "wide angles should fall out");
        assert!(!sweep.candidates.is_empty(), "straight angles should survive");
    }

    #[test]
    fn test_choose_shot_is_deterministic() {
        let cfg = TuningConfig::default();
        let field = BubbleField::from_raw(&[
            RawBubble { x: 30.0, y: 50.0, radius: 10.0, hit_count: 1 },
            RawBubble { x: 70.0, y: 50.0, radius: 10.0, hit_count: 1 },
        ]);
        let a = choose_shot(&arena(), &field, &cfg).unwrap();
        let b = choose_shot(&arena(), &field, &cfg).unwrap();
        assert_eq!(a, b);
    }
}
