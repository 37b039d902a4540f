/*!
Crate: asciiquarium_tides

A self-animating ASCII aquarium. Fish drift and wrap around, bubbles rise and
recycle, seaweed sways and waves shimmer under a sky that cycles from day to
night and back.

Layout:
- `entity`: the entity model and the fish, bubble, seaweed and wave rules.
- `registry`: the four entity collections, stepped in a fixed order.
- `environment`: sky colour cycle and the sea level it drives.
- `driver`: throttled animation driver, interval timer and cancel token.
- `aquarium`: ties everything to a `DisplaySurface`.
- `widgets`: an in-memory scene surface and the egui widget that paints it.
*/

#![forbid(unsafe_code)]

pub mod aquarium;
pub mod assets;
pub mod color;
pub mod config;
pub mod driver;
pub mod entity;
pub mod environment;
pub mod error;
pub mod registry;
pub mod surface;
pub mod widgets;

// Re-export common items for convenience at the crate root.
pub use aquarium::{Aquarium, FrameReport};
pub use assets::{fish_arts, measure_art, FishArt};
pub use color::Rgb;
pub use config::AquariumConfig;
pub use driver::{AnimationDriver, CancelToken, IntervalTimer, Poll};
pub use entity::{mirror_art, Entity, EntityKind};
pub use environment::{Environment, SkyCycle, SkyFrame};
pub use error::RenderError;
pub use registry::Registry;
pub use surface::{DisplaySurface, ElementId, ElementSpec, Point, Size, Viewport};
pub use widgets::{render_scene_to_string, AquariumTheme, AquariumWidget, SceneSurface};
