/*!
Hard-coded tuning for the aquarium.

Rule constants (timings, probabilities, offsets) are plain `const`s used directly
by the entity and environment code. Population sizes, the tick rate and the RNG
seed are gathered into [`AquariumConfig`] so hosts and tests can build a smaller
or deterministic tank without touching the rules.
*/

/// Driver tick rate.
pub const TARGET_FPS: f64 = 60.0;

/// Fish are spawned in batches of this size, one or two batches per tank.
pub const FISH_BATCH: usize = 10;
pub const BUBBLE_COUNT: usize = 40;
pub const SEAWEED_COUNT: usize = 30;

/// Fish and bubbles start on one of the "lines" 2..=8 counted from the bottom,
/// where the viewport height is split into this many lines.
pub const SPAWN_LINES: f32 = 10.0;

pub const FISH_MIN_SPEED: f32 = 0.5;
pub const FISH_SPEED_RANGE: f32 = 1.5;

pub const BUBBLE_MIN_SPEED: f32 = 0.5;
/// Upper bound of the random speed-up applied to a bubble (1.0 ..= 1.5x).
pub const BUBBLE_SPEED_SCALE: f32 = 0.5;
/// Bubbles recycle once they rise this far above the sea level line.
pub const BUBBLE_RESET_OFFSET: f32 = 10.0;
pub const BUBBLE_DEPTH_BANDS: usize = 8;

pub const SEAWEED_MAX_HEIGHT: usize = 8;
/// Minimum time between two sway mutations of the same stalk.
pub const SEAWEED_SWAY_COOLDOWN_MS: f64 = 500.0;
/// Period of the cosmetic sway animation applied by the display.
pub const SEAWEED_SWAY_PERIOD_MS: f64 = 10_000.0;
pub const SEAWEED_MIN_BOTTOM: f32 = 10.0;
pub const SEAWEED_BOTTOM_RANGE: f32 = 20.0;

/// Probability that a wave toggles one slot on a tick.
pub const WAVE_TOGGLE_PROBABILITY: f64 = 0.5;
/// Initial vertical offsets and `"~ "` densities of the three wave strips.
pub const WAVE_LAYERS: [(f32, f32); 3] = [(70.0, 1.0), (80.0, 0.4), (90.0, 0.1)];
/// Vertical distance between stacked wave strips.
pub const WAVE_SPACING: f32 = 10.0;

/// Time for one full palette transition, and the number of steps it takes.
pub const SKY_TRANSITION_MS: f64 = 15_000.0;
pub const SKY_STEPS: u32 = 100;
pub const SKY_BANDS: usize = 4;
pub const SKY_BAND_HEIGHT: f32 = 20.0;
pub const SKY_AMPLITUDE: f32 = 5.0;
/// Shift applied to the sky bands, pushing the sea level down.
pub const SKY_VERTICAL_SHIFT: f32 = -20.0;
/// The sky timer never replays more than this many missed steps at once.
pub const SKY_MAX_CATCH_UP: u32 = 8;

pub const SAND_BANDS: usize = 8;
pub const SAND_BAND_HEIGHT: f32 = 10.0;

/// Population sizes, tick rate and seed for one aquarium.
#[derive(Debug, Clone, PartialEq)]
pub struct AquariumConfig {
    pub target_fps: f64,
    /// `None` picks one or two batches of [`FISH_BATCH`] at random.
    pub fish_count: Option<usize>,
    pub bubble_count: usize,
    pub seaweed_count: usize,
    /// Seed for a deterministic tank; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            fish_count: None,
            bubble_count: BUBBLE_COUNT,
            seaweed_count: SEAWEED_COUNT,
            seed: None,
        }
    }
}

impl AquariumConfig {
    /// Minimum time between two driver ticks.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    /// Interval of the sky timer.
    pub fn sky_step_ms(&self) -> f64 {
        SKY_TRANSITION_MS / SKY_STEPS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals() {
        let cfg = AquariumConfig::default();
        assert!((cfg.frame_interval_ms() - 1000.0 / 60.0).abs() < 1e-9);
        assert_eq!(cfg.sky_step_ms(), 150.0);
        assert_eq!(cfg.bubble_count, 40);
        assert_eq!(cfg.seaweed_count, 30);
    }
}
