use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One detected bubble as reported by the vision layer. Unvalidated:
/// `hit_count` is signed so malformed digit reads stay representable
/// until the frame boundary rejects them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawBubble {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hit_count: i32,
}

/// One detector frame: play-field rectangle, shooter origin, bubbles.
/// `game_area` is `[x, y, width, height]` in screen pixels, matching the
/// detector's bounding-box output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFrame {
    pub game_area: [f32; 4],
    pub shooter: [f32; 2],
    pub bubbles: Vec<RawBubble>,
}

impl RawFrame {
    pub fn shooter_point(&self) -> Vec2 {
        Vec2::new(self.shooter[0], self.shooter[1])
    }
}

/// The one value that crosses into the automation layer: where to place
/// the cursor before clicking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub aim_point: Vec2,
}

/// Every tunable physics and scoring parameter, passed by value into the
/// aiming core. Defaults mirror `constants`; a JSON file can override any
/// subset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub launch_speed: f32,
    pub gravity: f32,
    pub step_size: f32,
    pub max_steps: u32,
    pub hit_margin: f32,
    pub sweep_limit: f32,
    pub sweep_step: f32,
    pub aim_distance: f32,
    pub miss_score: f32,
    pub lethal_bonus: f32,
    pub multi_hit_base: f32,
    pub urgency_weight: f32,
    pub chain_radius: f32,
    pub chain_weight: f32,
    pub chain_max_hit: u32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            launch_speed: crate::LAUNCH_SPEED,
            gravity: crate::GRAVITY,
            step_size: crate::STEP_SIZE,
            max_steps: crate::MAX_STEPS,
            hit_margin: crate::HIT_MARGIN,
            sweep_limit: crate::SWEEP_LIMIT,
            sweep_step: crate::SWEEP_STEP,
            aim_distance: crate::AIM_DISTANCE,
            miss_score: crate::MISS_SCORE,
            lethal_bonus: crate::LETHAL_BONUS,
            multi_hit_base: crate::MULTI_HIT_BASE,
            urgency_weight: crate::URGENCY_WEIGHT,
            chain_radius: crate::CHAIN_RADIUS,
            chain_weight: crate::CHAIN_WEIGHT,
            chain_max_hit: crate::CHAIN_MAX_HIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_partial_override() {
        let cfg: TuningConfig = serde_json::from_str(r#"{"gravity": 60.0}"#).unwrap();
        assert!((cfg.gravity - 60.0).abs() < 1e-6);
        assert!((cfg.launch_speed - crate::LAUNCH_SPEED).abs() < 1e-6);
        assert_eq!(cfg.max_steps, crate::MAX_STEPS);
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = TuningConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TuningConfig = serde_json::from_str(&json).unwrap();
        assert!((back.sweep_limit - cfg.sweep_limit).abs() < 1e-6);
        assert!((back.lethal_bonus - cfg.lethal_bonus).abs() < 1e-6);
    }

    #[test]
    fn test_raw_frame_deserializes_detector_shape() {
        let json = r#"{
            "game_area": [0.0, 0.0, 800.0, 600.0],
            "shooter": [400.0, 550.0],
            "bubbles": [{"x": 200.0, "y": 150.0, "radius": 25.0, "hit_count": 2}]
        }"#;
        let frame: RawFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.bubbles.len(), 1);
        assert!((frame.shooter_point().x - 400.0).abs() < 1e-6);
    }
}
