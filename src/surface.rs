/*!
The display binding the simulation draws through.

The simulation never paints anything itself. It creates elements on a
[`DisplaySurface`] once, then pushes position, text and colour changes to them as
entities move. [`crate::widgets::SceneSurface`] is the bundled implementation.

Notes:
- Coordinates are pixels, origin at the top-left of the viewport.
- Bottom-anchored elements measure `y` upwards from the bottom edge.
*/

use crate::color::Rgb;
use crate::entity::EntityKind;
use crate::error::RenderError;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Visible area of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Width of one character cell, used to size text strips.
    pub char_width: f32,
}

impl Viewport {
    /// Number of character columns that fit across the viewport (at least one).
    pub fn columns(&self) -> usize {
        if self.char_width <= 0.0 {
            return 1;
        }
        ((self.width / self.char_width).ceil() as usize).max(1)
    }
}

/// Handle to an element created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

/// Which edge an element's `y` is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    BottomLeft,
}

/// Display category of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    Sand,
    Sky,
    Entity(EntityKind),
}

/// What an element looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Monospace text, possibly multi-line.
    Text(String),
    /// A full-width filled band of the given height.
    Band { height: f32 },
}

/// Continuous cosmetic rotation around the bottom-centre of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub period_ms: f64,
}

/// Everything a surface needs to create an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub class: ElementClass,
    pub shape: Shape,
    pub color: Rgb,
    pub position: Point,
    pub anchor: Anchor,
    pub sway: Option<Sway>,
}

impl ElementSpec {
    /// Top-left anchored text element.
    pub fn text(class: ElementClass, text: impl Into<String>, color: Rgb, position: Point) -> Self {
        Self {
            class,
            shape: Shape::Text(text.into()),
            color,
            position,
            anchor: Anchor::TopLeft,
            sway: None,
        }
    }

    /// Full-width band element.
    pub fn band(class: ElementClass, height: f32, color: Rgb, position: Point) -> Self {
        Self {
            class,
            shape: Shape::Band { height },
            color,
            position,
            anchor: Anchor::TopLeft,
            sway: None,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn swaying(mut self, sway: Sway) -> Self {
        self.sway = Some(sway);
        self
    }
}

/// Host capability the simulation renders through.
///
/// Only creation can fail. Updates to an unknown element are ignored by
/// implementations.
pub trait DisplaySurface {
    fn viewport(&self) -> Viewport;

    fn create_element(&mut self, spec: ElementSpec) -> Result<ElementId, RenderError>;

    fn set_position(&mut self, id: ElementId, position: Point);

    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_color(&mut self, id: ElementId, color: Rgb);

    /// Resize a band element.
    fn set_band(&mut self, id: ElementId, height: f32);

    /// Rendered size of an element, if the surface knows it.
    fn element_size(&self, id: ElementId) -> Option<Size>;
}
