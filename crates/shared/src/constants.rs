// Projectile physics
pub const LAUNCH_SPEED: f32 = 500.0; // pixels/second
pub const GRAVITY: f32 = 9.81; // pixels/second^2, downward
pub const STEP_SIZE: f32 = 1.0 / 60.0; // 60 Hz integration
pub const MAX_STEPS: u32 = 1000;

// Collision
pub const HIT_MARGIN: f32 = 4.0; // projectile radius added to bubble radius

// Angle sweep (radians from vertical; 0 = straight up, positive = right)
pub const SWEEP_LIMIT: f32 = 1.396_263_4; // 80 degrees
pub const SWEEP_STEP: f32 = 0.087_266_46; // 5 degrees

// Aim-point mapping
pub const AIM_DISTANCE: f32 = 200.0; // cursor offset from the shooter

// Scoring weights
pub const MISS_SCORE: f32 = 0.0;
pub const LETHAL_BONUS: f32 = 150.0;
pub const MULTI_HIT_BASE: f32 = 100.0;
pub const URGENCY_WEIGHT: f32 = 40.0;
pub const CHAIN_RADIUS: f32 = 60.0;
pub const CHAIN_WEIGHT: f32 = 10.0;
pub const CHAIN_MAX_HIT: u32 = 2;

// Synthetic frames (detector-calibrated bounds)
pub const SYNTH_WIDTH: f32 = 800.0;
pub const SYNTH_HEIGHT: f32 = 600.0;
pub const MIN_BUBBLE_RADIUS: f32 = 15.0;
pub const MAX_BUBBLE_RADIUS: f32 = 40.0;
