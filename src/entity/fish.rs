//! Fish: horizontal drifters that wrap around and face their direction of travel.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Behavior, Body, Entity, EntityKind, TickContext, Variant, Velocity};
use crate::assets::FishArt;
use crate::color::{Rgb, FISH_PALETTE};
use crate::config::{FISH_MIN_SPEED, FISH_SPEED_RANGE, SPAWN_LINES};
use crate::error::RenderError;
use crate::surface::{DisplaySurface, ElementClass, ElementSpec, Point};

/// Mirror a single character to its horizontal counterpart.
fn mirror_char(c: char) -> char {
    match c {
        '\\' => '/',
        '/' => '\\',
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        _ => c,
    }
}

/// Mirror multi-line art horizontally.
///
/// Each line is reversed on its own and every directional glyph is swapped
/// with its partner exactly once, so `mirror_art(&mirror_art(a)) == a`.
pub fn mirror_art(art: &str) -> String {
    art.split('\n')
        .map(|line| line.chars().rev().map(mirror_char).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub struct FishState {
    /// Art as authored, facing right.
    pub original: String,
    pub mirrored: String,
    /// Whether `mirrored` is what the display shows.
    pub showing_mirrored: bool,
    /// Picked once at creation.
    pub color: Rgb,
}

impl FishState {
    /// Show the art matching the current direction. Speed zero keeps the
    /// current orientation.
    fn face(&mut self, body: &mut Body, surface: &mut dyn DisplaySurface) {
        let want_mirrored = if body.velocity.x < 0.0 {
            true
        } else if body.velocity.x > 0.0 {
            false
        } else {
            return;
        };
        if want_mirrored != self.showing_mirrored {
            self.showing_mirrored = want_mirrored;
            let art = if want_mirrored {
                self.mirrored.clone()
            } else {
                self.original.clone()
            };
            body.set_art(art, surface);
        }
    }
}

impl Behavior for FishState {
    fn step(&mut self, body: &mut Body, ctx: &mut TickContext<'_>) {
        body.advance(ctx.surface);
        self.face(body, ctx.surface);

        let width = body.rendered_width(ctx.surface);
        if body.velocity.x > 0.0 && body.position.x > ctx.viewport.width {
            body.position.x = -width;
        } else if body.velocity.x < 0.0 && body.position.x < -width {
            body.position.x = ctx.viewport.width;
        }
        body.sync_position(ctx.surface);
    }
}

/// Create one fish at `position` moving with `speed_x`.
pub fn new_fish(
    surface: &mut dyn DisplaySurface,
    art: &str,
    position: Point,
    speed_x: f32,
    color: Rgb,
) -> Result<Entity, RenderError> {
    let original = art.to_string();
    let mirrored = mirror_art(art);
    let showing_mirrored = speed_x < 0.0;
    let shown = if showing_mirrored {
        mirrored.clone()
    } else {
        original.clone()
    };
    let element = surface.create_element(ElementSpec::text(
        ElementClass::Entity(EntityKind::Fish),
        shown.clone(),
        color,
        position,
    ))?;
    Ok(Entity {
        body: Body {
            position,
            velocity: Velocity { x: speed_x, y: 0.0 },
            art: shown,
            element,
        },
        variant: Variant::Fish(FishState {
            original,
            mirrored,
            showing_mirrored,
            color,
        }),
    })
}

/// Create a fish with random art, colour, lane, speed and direction.
pub fn spawn_fish(
    surface: &mut dyn DisplaySurface,
    rng: &mut StdRng,
    arts: &[FishArt],
) -> Result<Entity, RenderError> {
    let vp = surface.viewport();
    let art = arts.choose(rng).map(|a| a.art).unwrap_or("><>");
    let x = rng.gen::<f32>() * vp.width;
    let y = spawn_lane(rng, vp.height);
    let speed = FISH_MIN_SPEED + rng.gen::<f32>() * FISH_SPEED_RANGE;
    let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let color = FISH_PALETTE[rng.gen_range(0..FISH_PALETTE.len())];
    new_fish(surface, art, Point::new(x, y), speed * direction, color)
}

/// Starting height on one of the lines 2..=8 counted from the bottom.
pub(crate) fn spawn_lane(rng: &mut StdRng, height: f32) -> f32 {
    let line_height = height / SPAWN_LINES;
    height - rng.gen_range(2..=8) as f32 * line_height
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng, scene};
    use super::*;
    use crate::assets::fish_arts;
    use crate::entity::DepthPalette;

    fn fish_state(e: &Entity) -> &FishState {
        match &e.variant {
            Variant::Fish(f) => f,
            other => panic!("expected fish, got {:?}", other.kind()),
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        for a in fish_arts() {
            assert_eq!(mirror_art(&mirror_art(a.art)), a.art);
        }
        let odd = "\\\\ //\n<(( ))>\n";
        assert_eq!(mirror_art(&mirror_art(odd)), odd);
    }

    #[test]
    fn mirror_swaps_pairs_exactly_once() {
        let art = "(<\\ / >)  ((";
        let m = mirror_art(art);
        assert_eq!(m, "))  (< \\ />)");
        let mut a: Vec<char> = art.chars().map(mirror_char).collect();
        let mut b: Vec<char> = m.chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn mirror_reverses_each_line_independently() {
        assert_eq!(mirror_art("><>\n  o"), "<><\no  ");
        assert_eq!(mirror_art("<º)))><"), "><(((º>");
    }

    #[test]
    fn left_swimmer_starts_mirrored() {
        let mut s = scene(300.0, 200.0);
        let f = new_fish(&mut s, "><>", Point::new(50.0, 50.0), -1.0, Rgb(1, 1, 1)).unwrap();
        assert_eq!(f.body.art, "<><");
        assert!(fish_state(&f).showing_mirrored);
        assert_eq!(s.text_of(f.body.element), Some("<><"));
    }

    #[test]
    fn direction_change_flips_within_one_tick() {
        let mut s = scene(300.0, 200.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut f = new_fish(&mut s, "><(", Point::new(50.0, 50.0), 1.0, Rgb(1, 1, 1)).unwrap();
        f.body.velocity.x = -1.0;
        f.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(f.body.art, ")><");
        assert_eq!(s.text_of(f.body.element), Some(")><"));
        f.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(f.body.art, ")><");
        f.body.velocity.x = 1.0;
        f.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(f.body.art, "><(");
        assert!(!fish_state(&f).showing_mirrored);
    }

    #[test]
    fn rightward_wrap_lands_at_negative_width() {
        let mut s = scene(300.0, 200.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut f = new_fish(&mut s, "><>", Point::new(300.5, 40.0), 1.0, Rgb(1, 1, 1)).unwrap();
        f.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        // Three columns of 6 px.
        assert_eq!(f.body.position.x, -18.0);
        assert_eq!(s.element(f.body.element).unwrap().position.x, -18.0);
    }

    #[test]
    fn leftward_wrap_lands_at_viewport_width() {
        let mut s = scene(300.0, 200.0);
        let (mut r, mut p) = (rng(), DepthPalette::default());
        let mut f = new_fish(&mut s, "><>", Point::new(-17.5, 40.0), -1.0, Rgb(1, 1, 1)).unwrap();
        f.step(&mut ctx(&mut s, &mut r, &mut p, 0.0, 60.0));
        assert_eq!(f.body.position.x, 300.0);
    }

    #[test]
    fn spawned_fish_stay_in_lanes_and_palette() {
        let mut s = scene(400.0, 300.0);
        let mut r = rng();
        let arts = fish_arts();
        for _ in 0..50 {
            let f = spawn_fish(&mut s, &mut r, &arts).unwrap();
            let st = fish_state(&f);
            assert!(FISH_PALETTE.contains(&st.color));
            assert!(f.body.position.x >= 0.0 && f.body.position.x < 400.0);
            assert!(f.body.position.y >= 300.0 - 8.0 * 30.0 - 1e-3);
            assert!(f.body.position.y <= 300.0 - 2.0 * 30.0 + 1e-3);
            let speed = f.body.velocity.x.abs();
            assert!((0.5..2.0).contains(&speed));
            assert_eq!(f.body.velocity.y, 0.0);
            assert_eq!(st.showing_mirrored, f.body.velocity.x < 0.0);
        }
    }
}
