/*!
Sky cycle and the sea level it drives.

The sky walks through [`SKY_PALETTE`] (day, evening, night, sunrise), taking
[`SKY_STEPS`] steps per transition. Every step also breathes the sky bands up and
down along one sine period per transition. The bottom of the stacked bands is
the sea level that waves hang from and bubbles recycle under.
*/

use std::f32::consts::TAU;

use tracing::{debug, trace};

use crate::color::{Rgb, SKY_PALETTE};
use crate::config::{SKY_AMPLITUDE, SKY_BANDS, SKY_BAND_HEIGHT, SKY_STEPS, SKY_VERTICAL_SHIFT};

/// Everything the display and the entities need from one sky step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyFrame {
    pub color: Rgb,
    pub band_height: f32,
    /// Top edge of each sky band.
    pub band_tops: [f32; SKY_BANDS],
    pub sea_level: f32,
}

impl SkyFrame {
    /// Frame for `step` out of `steps` between two palette colours.
    pub fn compute(start: Rgb, end: Rgb, step: u32, steps: u32) -> Self {
        let t = if steps == 0 {
            0.0
        } else {
            step as f32 / steps as f32
        };
        let color = start.lerp(end, t);
        let band_height = SKY_BAND_HEIGHT + (t * TAU).sin() * SKY_AMPLITUDE;
        let mut band_tops = [0.0; SKY_BANDS];
        for (i, top) in band_tops.iter_mut().enumerate() {
            *top = i as f32 * band_height + SKY_VERTICAL_SHIFT;
        }
        let sea_level = band_height * SKY_BANDS as f32 + SKY_VERTICAL_SHIFT;
        Self {
            color,
            band_height,
            band_tops,
            sea_level,
        }
    }
}

/// Position in the endless day/night loop.
#[derive(Debug, Clone)]
pub struct SkyCycle {
    palette_index: usize,
    step: u32,
    steps: u32,
}

impl Default for SkyCycle {
    fn default() -> Self {
        Self {
            palette_index: 0,
            step: 0,
            steps: SKY_STEPS,
        }
    }
}

impl SkyCycle {
    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Frame for the current position, without advancing.
    pub fn current(&self) -> SkyFrame {
        let start = SKY_PALETTE[self.palette_index];
        let end = SKY_PALETTE[(self.palette_index + 1) % SKY_PALETTE.len()];
        SkyFrame::compute(start, end, self.step, self.steps)
    }

    /// Produce the current frame and move one step on.
    ///
    /// The step runs `0..=steps`, so the final frame of a transition shows the
    /// next colour exactly before the palette index rolls over.
    pub fn advance(&mut self) -> SkyFrame {
        let frame = self.current();
        trace!(
            palette = self.palette_index,
            step = self.step,
            sea_level = frame.sea_level,
            "sky step"
        );
        self.step += 1;
        if self.step > self.steps {
            self.step = 0;
            self.palette_index = (self.palette_index + 1) % SKY_PALETTE.len();
            debug!(palette = self.palette_index, "sky palette rolled over");
        }
        frame
    }
}

/// Shared environment state read by entities each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub sky: SkyFrame,
}

impl Environment {
    pub fn new(sky: SkyFrame) -> Self {
        Self { sky }
    }

    pub fn sea_level(&self) -> f32 {
        self.sky.sea_level
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(SkyCycle::default().current())
    }
}
