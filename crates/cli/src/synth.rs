use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bubblebot_shared::{
    RawBubble, RawFrame, MAX_BUBBLE_RADIUS, MIN_BUBBLE_RADIUS, SYNTH_HEIGHT, SYNTH_WIDTH,
};

/// Generate a reproducible synthetic detector frame: a standard 800x600
/// arena with the shooter bottom-center and `bubble_count` bubbles spread
/// over the upper field. Radii match what the detector is calibrated for.
pub fn generate_frame(seed: u64, bubble_count: usize) -> RawFrame {
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut bubbles = Vec::with_capacity(bubble_count);
    for _ in 0..bubble_count {
        let radius = rng.gen_range(MIN_BUBBLE_RADIUS..=MAX_BUBBLE_RADIUS);
        let x = rng.gen_range(radius..SYNTH_WIDTH - radius);
        let y = rng.gen_range(radius + 20.0..SYNTH_HEIGHT * 0.6);
        let hit_count = rng.gen_range(1..=5);
        bubbles.push(RawBubble {
            x,
            y,
            radius,
            hit_count,
        });
    }

    RawFrame {
        game_area: [0.0, 0.0, SYNTH_WIDTH, SYNTH_HEIGHT],
        shooter: [SYNTH_WIDTH / 2.0, SYNTH_HEIGHT],
        bubbles,
    }
}
