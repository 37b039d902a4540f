//! Waves: fixed strips whose density wanders one slot at a time.

use rand::Rng;

use super::{Behavior, Body, Entity, EntityKind, TickContext, Variant, Velocity};
use crate::color::WAVE;
use crate::config::{WAVE_SPACING, WAVE_TOGGLE_PROBABILITY};
use crate::error::RenderError;
use crate::surface::{DisplaySurface, ElementClass, ElementSpec, Point};

/// `"~ "` repeated `floor(width / 10 * density)` times, space-padded to `columns`.
pub fn strip_art(viewport_width: f32, density: f32, columns: usize) -> String {
    let pairs = (viewport_width / 10.0 * density).floor().max(0.0) as usize;
    let mut art = "~ ".repeat(pairs);
    let len = art.chars().count();
    let target = columns.max(1);
    if len < target {
        art.extend(std::iter::repeat(' ').take(target - len));
    }
    art
}

/// Flip one slot between `~` and a space.
fn toggle(slot: char) -> char {
    if slot == ' ' {
        '~'
    } else {
        ' '
    }
}

/// Vertical position of the wave at `layer` for a given sea level.
pub fn layer_y(sea_level: f32, layer: usize) -> f32 {
    sea_level + layer as f32 * WAVE_SPACING - WAVE_SPACING
}

#[derive(Debug, Clone)]
pub struct WaveState {
    /// Stacking index, 0 is the topmost strip.
    pub layer: usize,
}

impl WaveState {
    /// Move the strip to track the sea level.
    pub fn align(&self, body: &mut Body, sea_level: f32, surface: &mut dyn DisplaySurface) {
        body.position.y = layer_y(sea_level, self.layer);
        body.sync_position(surface);
    }
}

impl Behavior for WaveState {
    fn step(&mut self, body: &mut Body, ctx: &mut TickContext<'_>) {
        if !ctx.rng.gen_bool(WAVE_TOGGLE_PROBABILITY) {
            return;
        }
        let mut slots: Vec<char> = body.art.chars().collect();
        if slots.is_empty() {
            return;
        }
        let i = ctx.rng.gen_range(0..slots.len());
        slots[i] = toggle(slots[i]);
        body.set_art(slots.into_iter().collect(), ctx.surface);
    }
}

pub fn new_wave(
    surface: &mut dyn DisplaySurface,
    layer: usize,
    y: f32,
    density: f32,
) -> Result<Entity, RenderError> {
    let vp = surface.viewport();
    let art = strip_art(vp.width, density, vp.columns());
    let position = Point::new(0.0, y);
    let element = surface.create_element(ElementSpec::text(
        ElementClass::Entity(EntityKind::Wave),
        art.clone(),
        WAVE,
        position,
    ))?;
    Ok(Entity {
        body: Body {
            position,
            velocity: Velocity::default(),
            art,
            element,
        },
        variant: Variant::Wave(WaveState { layer }),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng, scene};
    use super::*;
    use crate::entity::DepthPalette;

    #[test]
    fn strip_density_and_padding() {
        let art = strip_art(100.0, 1.0, 30);
        assert_eq!(art.chars().count(), 30);
        assert!(art.starts_with("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ "));
        assert_eq!(art.matches('~').count(), 10);

        let thin = strip_art(100.0, 0.4, 30);
        assert_eq!(thin.matches('~').count(), 4);

        // Longer than the padding target: nothing is cut.
        let wide = strip_art(600.0, 1.0, 10);
        assert_eq!(wide.chars().count(), 120);

        assert_eq!(strip_art(5.0, 0.1, 0), " ");
    }

    #[test]
    fn ticks_change_at_most_one_slot() {
        let mut s = scene(120.0, 200.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut w = new_wave(&mut s, 0, 70.0, 1.0).unwrap();
        let mut changed_ticks = 0;
        for _ in 0..200 {
            let before: Vec<char> = w.body.art.chars().collect();
            w.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
            let after: Vec<char> = w.body.art.chars().collect();
            assert_eq!(before.len(), after.len());
            let diff = before.iter().zip(&after).filter(|(a, b)| a != b).count();
            assert!(diff <= 1);
            if diff == 1 {
                changed_ticks += 1;
            }
            assert!(after.iter().all(|c| *c == '~' || *c == ' '));
        }
        // p = 0.5 over 200 ticks.
        assert!((60..=140).contains(&changed_ticks), "{changed_ticks}");
        assert_eq!(w.body.position, Point::new(0.0, 70.0));
        assert_eq!(s.text_of(w.body.element), Some(w.body.art.as_str()));
    }

    #[test]
    fn align_tracks_sea_level() {
        let mut s = scene(120.0, 200.0);
        let mut w = new_wave(&mut s, 2, 90.0, 0.1).unwrap();
        if let Variant::Wave(state) = &w.variant {
            let state = state.clone();
            state.align(&mut w.body, 60.0, &mut s);
        }
        assert_eq!(w.body.position.y, 70.0);
        assert_eq!(s.element(w.body.element).unwrap().position.y, 70.0);
        assert_eq!(layer_y(60.0, 0), 50.0);
    }
}
