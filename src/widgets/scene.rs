/*!
Retained in-memory display surface.

`SceneSurface` keeps every element the simulation creates, in creation order,
and answers size queries from fixed character-cell metrics. The egui widget
paints it; [`render_scene_to_string`] rasterizes it into a character grid for
terminals and tests.

Notes:
- Text size is `columns * char_width` by `rows * line_height` (see `measure_art`).
- Bands are full-width fills and are skipped by the text rasterizer.
- Spaces in text are transparent when rasterizing.
*/

use crate::assets::measure_art;
use crate::color::{Rgb, BACKGROUND};
use crate::error::RenderError;
use crate::surface::{
    Anchor, DisplaySurface, ElementClass, ElementId, ElementSpec, Point, Shape, Size, Sway,
    Viewport,
};

/// Pixel size of one character cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            char_width: 6.0,
            line_height: 10.0,
        }
    }
}

/// One element as the surface stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub class: ElementClass,
    pub shape: Shape,
    pub color: Rgb,
    pub position: Point,
    pub anchor: Anchor,
    pub sway: Option<Sway>,
}

#[derive(Debug, Clone)]
pub struct SceneSurface {
    width: f32,
    height: f32,
    metrics: CellMetrics,
    background: Rgb,
    capacity: Option<usize>,
    elements: Vec<Element>,
}

impl SceneSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            metrics: CellMetrics::default(),
            background: BACKGROUND,
            capacity: None,
            elements: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Refuse element creation past `capacity` elements.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Text of a text element.
    pub fn text_of(&self, id: ElementId) -> Option<&str> {
        match &self.element(id)?.shape {
            Shape::Text(t) => Some(t),
            Shape::Band { .. } => None,
        }
    }

    fn size_of(&self, el: &Element) -> Size {
        match &el.shape {
            Shape::Text(t) => {
                let (cols, rows) = measure_art(t);
                Size::new(
                    cols as f32 * self.metrics.char_width,
                    rows as f32 * self.metrics.line_height,
                )
            }
            Shape::Band { height } => Size::new(self.width, *height),
        }
    }

    /// Top-left corner of an element in viewport pixels.
    pub fn top_left(&self, el: &Element) -> Point {
        match el.anchor {
            Anchor::TopLeft => el.position,
            Anchor::BottomLeft => Point::new(
                el.position.x,
                self.height - el.position.y - self.size_of(el).height,
            ),
        }
    }
}

impl DisplaySurface for SceneSurface {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
            char_width: self.metrics.char_width,
        }
    }

    fn create_element(&mut self, spec: ElementSpec) -> Result<ElementId, RenderError> {
        if let Some(capacity) = self.capacity {
            if self.elements.len() >= capacity {
                return Err(RenderError::SurfaceFull { capacity });
            }
        }
        if !spec.position.is_finite() {
            return Err(RenderError::NonFiniteGeometry {
                x: spec.position.x,
                y: spec.position.y,
            });
        }
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            class: spec.class,
            shape: spec.shape,
            color: spec.color,
            position: spec.position,
            anchor: spec.anchor,
            sway: spec.sway,
        });
        Ok(id)
    }

    fn set_position(&mut self, id: ElementId, position: Point) {
        if let Some(el) = self.elements.get_mut(id.0) {
            el.position = position;
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.elements.get_mut(id.0) {
            if let Shape::Text(t) = &mut el.shape {
                t.clear();
                t.push_str(text);
            }
        }
    }

    fn set_color(&mut self, id: ElementId, color: Rgb) {
        if let Some(el) = self.elements.get_mut(id.0) {
            el.color = color;
        }
    }

    fn set_band(&mut self, id: ElementId, height: f32) {
        if let Some(el) = self.elements.get_mut(id.0) {
            if let Shape::Band { height: h } = &mut el.shape {
                *h = height;
            }
        }
    }

    fn element_size(&self, id: ElementId) -> Option<Size> {
        self.element(id).map(|el| self.size_of(el))
    }
}

/// Rasterize the scene's text elements into a newline-separated character grid.
///
/// Later elements overdraw earlier ones; anything outside the grid is clipped.
pub fn render_scene_to_string(scene: &SceneSurface) -> String {
    let m = scene.metrics;
    if m.char_width <= 0.0 || m.line_height <= 0.0 {
        return String::new();
    }
    let w = (scene.width / m.char_width).floor() as usize;
    let h = (scene.height / m.line_height).floor() as usize;
    if w == 0 || h == 0 {
        return String::new();
    }

    let mut grid = vec![' '; w * h];

    for el in &scene.elements {
        let Shape::Text(text) = &el.shape else {
            continue;
        };
        let origin = scene.top_left(el);
        let x0 = (origin.x / m.char_width).floor() as isize;
        let y0 = (origin.y / m.line_height).floor() as isize;
        for (dy, line) in text.lines().enumerate() {
            let y = y0 + dy as isize;
            if y < 0 || y >= h as isize {
                continue;
            }
            for (dx, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = x0 + dx as isize;
                if x < 0 || x >= w as isize {
                    continue;
                }
                grid[y as usize * w + x as usize] = ch;
            }
        }
    }

    let mut out = String::with_capacity((w + 1) * h);
    for row in 0..h {
        let start = row * w;
        out.extend(grid[start..start + w].iter().copied());
        if row + 1 < h {
            out.push('\n');
        }
    }
    out
}
