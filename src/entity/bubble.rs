//! Bubbles: rise at a constant speed, shade by depth and recycle below the surface.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::fish::spawn_lane;
use super::{Behavior, Body, Entity, EntityKind, TickContext, Variant, Velocity};
use crate::color::{Rgb, BUBBLE_SHADES};
use crate::config::{BUBBLE_DEPTH_BANDS, BUBBLE_MIN_SPEED, BUBBLE_RESET_OFFSET, BUBBLE_SPEED_SCALE};
use crate::error::RenderError;
use crate::surface::{DisplaySurface, ElementClass, ElementSpec, Point};

const BUBBLE_GLYPHS: [&str; 4] = ["o", "O", ".", "º"];

/// Depth band (0 = top) of a vertical position.
pub fn depth_band(y: f32, height: f32) -> usize {
    if height <= 0.0 || !y.is_finite() {
        return 0;
    }
    let band = ((y / height) * BUBBLE_DEPTH_BANDS as f32).floor();
    band.clamp(0.0, (BUBBLE_DEPTH_BANDS - 1) as f32) as usize
}

/// Memoized band-to-colour lookup shared by all bubbles.
#[derive(Debug, Default, Clone)]
pub struct DepthPalette {
    cache: HashMap<usize, Rgb>,
    computed: usize,
}

impl DepthPalette {
    /// Colour of `band`, computed on first use and reused afterwards.
    pub fn color(&mut self, band: usize) -> Rgb {
        if let Some(c) = self.cache.get(&band) {
            return *c;
        }
        let c = BUBBLE_SHADES[band.min(BUBBLE_SHADES.len() - 1)];
        self.computed += 1;
        self.cache.insert(band, c);
        c
    }

    /// How many bands were resolved without a cache hit.
    pub fn computed(&self) -> usize {
        self.computed
    }
}

#[derive(Debug, Clone)]
pub struct BubbleState {
    pub band: usize,
    pub color: Rgb,
}

impl BubbleState {
    fn recolor(&mut self, body: &Body, ctx: &mut TickContext<'_>) {
        self.band = depth_band(body.position.y, ctx.viewport.height);
        self.color = ctx.depth_palette.color(self.band);
        ctx.surface.set_color(body.element, self.color);
    }
}

impl Behavior for BubbleState {
    fn step(&mut self, body: &mut Body, ctx: &mut TickContext<'_>) {
        body.advance(ctx.surface);

        if body.position.y <= ctx.sea_level - BUBBLE_RESET_OFFSET {
            body.position.y = ctx.viewport.height;
            body.position.x = ctx.rng.gen::<f32>() * ctx.viewport.width;
            self.recolor(body, ctx);
        }
        body.sync_position(ctx.surface);
    }
}

/// Create one bubble rising at `speed_y` pixels per tick.
pub fn new_bubble(
    surface: &mut dyn DisplaySurface,
    palette: &mut DepthPalette,
    glyph: &str,
    position: Point,
    speed_y: f32,
) -> Result<Entity, RenderError> {
    let band = depth_band(position.y, surface.viewport().height);
    let color = palette.color(band);
    let element = surface.create_element(ElementSpec::text(
        ElementClass::Entity(EntityKind::Bubble),
        glyph,
        color,
        position,
    ))?;
    Ok(Entity {
        body: Body {
            position,
            velocity: Velocity {
                x: 0.0,
                y: -speed_y.abs(),
            },
            art: glyph.to_string(),
            element,
        },
        variant: Variant::Bubble(BubbleState { band, color }),
    })
}

pub fn spawn_bubble(
    surface: &mut dyn DisplaySurface,
    rng: &mut StdRng,
    palette: &mut DepthPalette,
) -> Result<Entity, RenderError> {
    let vp = surface.viewport();
    let x = rng.gen::<f32>() * vp.width;
    let y = spawn_lane(rng, vp.height);
    let glyph = BUBBLE_GLYPHS.choose(rng).copied().unwrap_or("o");
    let speed = (BUBBLE_MIN_SPEED + rng.gen::<f32>()) * (1.0 + rng.gen::<f32>() * BUBBLE_SPEED_SCALE);
    new_bubble(surface, palette, glyph, Point::new(x, y), speed)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng, scene};
    use super::*;

    fn bubble_state(e: &Entity) -> &BubbleState {
        match &e.variant {
            Variant::Bubble(b) => b,
            other => panic!("expected bubble, got {:?}", other.kind()),
        }
    }

    #[test]
    fn bands_cover_the_viewport() {
        assert_eq!(depth_band(0.0, 800.0), 0);
        assert_eq!(depth_band(99.9, 800.0), 0);
        assert_eq!(depth_band(100.0, 800.0), 1);
        assert_eq!(depth_band(799.0, 800.0), 7);
        // The bottom edge itself belongs to the deepest band.
        assert_eq!(depth_band(800.0, 800.0), 7);
        assert_eq!(depth_band(-5.0, 800.0), 0);
    }

    #[test]
    fn palette_memoizes_per_band() {
        let mut p = DepthPalette::default();
        let a = p.color(3);
        let b = p.color(3);
        assert_eq!(a, b);
        assert_eq!(a, BUBBLE_SHADES[3]);
        assert_eq!(p.computed(), 1);
        p.color(5);
        p.color(3);
        assert_eq!(p.computed(), 2);
    }

    #[test]
    fn same_band_bubbles_share_colour() {
        let mut s = scene(200.0, 800.0);
        let mut p = DepthPalette::default();
        let a = new_bubble(&mut s, &mut p, "o", Point::new(1.0, 410.0), 1.0).unwrap();
        let b = new_bubble(&mut s, &mut p, "O", Point::new(90.0, 490.0), 1.0).unwrap();
        assert_eq!(bubble_state(&a).band, 4);
        assert_eq!(bubble_state(&a).color, bubble_state(&b).color);
        assert_eq!(p.computed(), 1);
    }

    #[test]
    fn rises_without_drifting() {
        let mut s = scene(200.0, 800.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut b = new_bubble(&mut s, &mut p, "o", Point::new(20.0, 500.0), 2.0).unwrap();
        b.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(b.body.position, Point::new(20.0, 498.0));
    }

    #[test]
    fn resets_to_bottom_below_sea_level() {
        let mut s = scene(200.0, 800.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let sea = 60.0;
        let mut b = new_bubble(&mut s, &mut p, "o", Point::new(20.0, 50.5), 1.0).unwrap();
        assert_eq!(bubble_state(&b).band, 0);
        b.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, sea));
        assert_eq!(b.body.position.y, 800.0);
        assert!(b.body.position.x >= 0.0 && b.body.position.x < 200.0);
        assert_eq!(bubble_state(&b).band, 7);
        assert_eq!(bubble_state(&b).color, BUBBLE_SHADES[7]);
        let el = s.element(b.body.element).unwrap();
        assert_eq!(el.color, BUBBLE_SHADES[7]);
        assert_eq!(el.position.y, 800.0);
    }

    #[test]
    fn stays_put_above_the_threshold() {
        let mut s = scene(200.0, 800.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut b = new_bubble(&mut s, &mut p, "o", Point::new(20.0, 52.0), 1.0).unwrap();
        b.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(b.body.position.y, 51.0);
    }

    #[test]
    fn spawned_speed_is_scaled_upwards() {
        let mut s = scene(200.0, 800.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        for _ in 0..50 {
            let b = spawn_bubble(&mut s, &mut r, &mut p).unwrap();
            let v = -b.body.velocity.y;
            assert!(v >= 0.5 && v < 2.25);
            assert_eq!(b.body.velocity.x, 0.0);
            assert!(BUBBLE_GLYPHS.contains(&b.body.art.as_str()));
        }
    }
}
