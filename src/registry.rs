//! The four entity collections, stepped in a fixed order.

use crate::entity::{Entity, EntityKind, TickContext, Variant};
use crate::surface::{DisplaySurface, Viewport};

/// Fish, bubbles, seaweed and waves, each in insertion order.
///
/// Nothing is ever removed: entities wrap or recycle instead.
#[derive(Debug, Default)]
pub struct Registry {
    pub fish: Vec<Entity>,
    pub bubbles: Vec<Entity>,
    pub seaweed: Vec<Entity>,
    pub waves: Vec<Entity>,
}

impl Registry {
    /// File an entity under the collection for its kind.
    pub fn insert(&mut self, entity: Entity) {
        match entity.kind() {
            EntityKind::Fish => self.fish.push(entity),
            EntityKind::Bubble => self.bubbles.push(entity),
            EntityKind::Seaweed => self.seaweed.push(entity),
            EntityKind::Wave => self.waves.push(entity),
        }
    }

    /// Step every entity once: fish, then bubbles, seaweed and waves.
    pub fn step_all(&mut self, ctx: &mut TickContext<'_>) {
        for e in self.iter_mut() {
            e.step(ctx);
        }
    }

    /// Move every wave to hang off the given sea level.
    pub fn align_waves(&mut self, sea_level: f32, surface: &mut dyn DisplaySurface) {
        for wave in &mut self.waves {
            if let Variant::Wave(state) = &wave.variant {
                state.align(&mut wave.body, sea_level, surface);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.fish
            .iter()
            .chain(&self.bubbles)
            .chain(&self.seaweed)
            .chain(&self.waves)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.fish
            .iter_mut()
            .chain(&mut self.bubbles)
            .chain(&mut self.seaweed)
            .chain(&mut self.waves)
    }

    pub fn len(&self) -> usize {
        self.fish.len() + self.bubbles.len() + self.seaweed.len() + self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many entities currently sit entirely outside the viewport.
    pub fn off_screen_count(&self, viewport: &Viewport, surface: &dyn DisplaySurface) -> usize {
        self.iter()
            .filter(|e| e.is_off_screen(viewport, surface))
            .count()
    }
}
