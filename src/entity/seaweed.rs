//! Seaweed: stationary bracket stalks that flip glyphs on their own clock.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Behavior, Body, Entity, EntityKind, TickContext, Variant, Velocity};
use crate::color::SEAWEED;
use crate::config::{
    SEAWEED_BOTTOM_RANGE, SEAWEED_MAX_HEIGHT, SEAWEED_MIN_BOTTOM, SEAWEED_SWAY_COOLDOWN_MS,
    SEAWEED_SWAY_PERIOD_MS,
};
use crate::error::RenderError;
use crate::surface::{Anchor, DisplaySurface, ElementClass, ElementSpec, Point, Sway};

/// Stalk art: `height` lines alternating `(` and `)`, each newline-terminated.
pub fn stalk_art(height: usize) -> String {
    (0..height.max(1))
        .map(|i| if i % 2 == 0 { "(\n" } else { ")\n" })
        .collect()
}

/// Re-pick every bracket independently; everything else passes through.
pub fn sway(art: &str, rng: &mut StdRng) -> String {
    art.chars()
        .map(|c| match c {
            '(' | ')' => {
                if rng.gen_bool(0.5) {
                    '('
                } else {
                    ')'
                }
            }
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SeaweedState {
    /// Simulated time of the last mutation.
    pub last_sway_ms: Option<f64>,
    pub mutations: u64,
}

impl SeaweedState {
    fn due(&self, now_ms: f64) -> bool {
        match self.last_sway_ms {
            None => true,
            Some(last) => now_ms - last > SEAWEED_SWAY_COOLDOWN_MS,
        }
    }
}

impl Behavior for SeaweedState {
    fn step(&mut self, body: &mut Body, ctx: &mut TickContext<'_>) {
        if !self.due(ctx.now_ms) {
            return;
        }
        let art = sway(&body.art, ctx.rng);
        body.set_art(art, ctx.surface);
        self.last_sway_ms = Some(ctx.now_ms);
        self.mutations += 1;
    }
}

/// Create a stalk whose base sits `bottom` pixels above the bottom edge.
pub fn new_seaweed(
    surface: &mut dyn DisplaySurface,
    height: usize,
    x: f32,
    bottom: f32,
) -> Result<Entity, RenderError> {
    let art = stalk_art(height);
    let position = Point::new(x, bottom);
    let element = surface.create_element(
        ElementSpec::text(
            ElementClass::Entity(EntityKind::Seaweed),
            art.clone(),
            SEAWEED,
            position,
        )
        .anchored(Anchor::BottomLeft)
        .swaying(Sway {
            period_ms: SEAWEED_SWAY_PERIOD_MS,
        }),
    )?;
    Ok(Entity {
        body: Body {
            position,
            velocity: Velocity::default(),
            art,
            element,
        },
        variant: Variant::Seaweed(SeaweedState::default()),
    })
}

pub fn spawn_seaweed(
    surface: &mut dyn DisplaySurface,
    rng: &mut StdRng,
) -> Result<Entity, RenderError> {
    let vp = surface.viewport();
    let height = rng.gen_range(1..=SEAWEED_MAX_HEIGHT);
    let x = rng.gen::<f32>() * vp.width;
    let bottom = SEAWEED_MIN_BOTTOM + rng.gen::<f32>() * SEAWEED_BOTTOM_RANGE;
    new_seaweed(surface, height, x, bottom)
}
