/*!
Entity model: one shared [`Body`] plus a variant payload per kind.

Every entity owns a body (position, velocity, art, display binding) and a
[`Variant`] that carries the kind-specific state. Each variant implements
[`Behavior`]; [`Entity::step`] dispatches to it once per driver tick.

Entities are created by the factory functions in the submodules and live for
the whole session. They wrap or recycle instead of being removed.
*/

pub mod bubble;
pub mod fish;
pub mod seaweed;
pub mod wave;

use rand::rngs::StdRng;

use crate::surface::{DisplaySurface, ElementId, Point, Viewport};

pub use bubble::{BubbleState, DepthPalette};
pub use fish::{mirror_art, FishState};
pub use seaweed::SeaweedState;
pub use wave::WaveState;

/// Display category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fish,
    Bubble,
    Seaweed,
    Wave,
}

/// Per-pixel-per-tick velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// State shared by every entity kind.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Point,
    pub velocity: Velocity,
    /// Currently displayed art. Never empty.
    pub art: String,
    pub element: ElementId,
}

impl Body {
    /// Advance by one velocity step and push the new position to the display.
    pub fn advance(&mut self, surface: &mut dyn DisplaySurface) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.sync_position(surface);
    }

    pub fn sync_position(&self, surface: &mut dyn DisplaySurface) {
        surface.set_position(self.element, self.position);
    }

    /// Replace the art and push it to the display.
    pub fn set_art(&mut self, art: String, surface: &mut dyn DisplaySurface) {
        self.art = art;
        surface.set_text(self.element, &self.art);
    }

    /// Rendered width, zero when the display cannot tell.
    pub fn rendered_width(&self, surface: &dyn DisplaySurface) -> f32 {
        surface
            .element_size(self.element)
            .map(|s| s.width)
            .unwrap_or(0.0)
    }

    /// Whether the bounding box lies entirely outside the viewport.
    pub fn is_off_screen(&self, viewport: &Viewport, surface: &dyn DisplaySurface) -> bool {
        let size = surface.element_size(self.element).unwrap_or_default();
        let Point { x, y } = self.position;
        x > viewport.width || x < -size.width || y > viewport.height || y < -size.height
    }
}

/// Everything an entity may read or touch during one tick.
pub struct TickContext<'a> {
    /// Simulated time in milliseconds.
    pub now_ms: f64,
    pub viewport: Viewport,
    /// Current sea level written by the sky cycle.
    pub sea_level: f32,
    pub rng: &'a mut StdRng,
    pub surface: &'a mut dyn DisplaySurface,
    pub depth_palette: &'a mut DepthPalette,
}

/// Kind-specific movement and content rules.
pub trait Behavior {
    fn step(&mut self, body: &mut Body, ctx: &mut TickContext<'_>);
}

/// Kind-specific payload of an entity.
#[derive(Debug, Clone)]
pub enum Variant {
    Fish(FishState),
    Bubble(BubbleState),
    Seaweed(SeaweedState),
    Wave(WaveState),
}

impl Variant {
    pub fn kind(&self) -> EntityKind {
        match self {
            Variant::Fish(_) => EntityKind::Fish,
            Variant::Bubble(_) => EntityKind::Bubble,
            Variant::Seaweed(_) => EntityKind::Seaweed,
            Variant::Wave(_) => EntityKind::Wave,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    pub variant: Variant,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        self.variant.kind()
    }

    /// Advance this entity by one tick.
    pub fn step(&mut self, ctx: &mut TickContext<'_>) {
        let body = &mut self.body;
        match &mut self.variant {
            Variant::Fish(s) => s.step(body, ctx),
            Variant::Bubble(s) => s.step(body, ctx),
            Variant::Seaweed(s) => s.step(body, ctx),
            Variant::Wave(s) => s.step(body, ctx),
        }
    }

    pub fn is_off_screen(&self, viewport: &Viewport, surface: &dyn DisplaySurface) -> bool {
        self.body.is_off_screen(viewport, surface)
    }
}
