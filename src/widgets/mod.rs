/*!
Display surfaces for the aquarium.

- `scene`: retained element store implementing `DisplaySurface`, plus a text rasterizer.
- `aquarium_widget`: egui widget that paints a scene.
*/

pub mod aquarium_widget;
pub mod scene;

pub use aquarium_widget::{AquariumTheme, AquariumWidget};
pub use scene::{render_scene_to_string, CellMetrics, Element, SceneSurface};
