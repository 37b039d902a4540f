/*!
egui widget that paints a [`SceneSurface`].

The widget is stateless: it borrows the scene every frame and draws bands as
filled rectangles and text elements as monospace labels, in creation order.
Swaying elements are sheared around their bottom edge.
*/

use egui;

use super::scene::{Element, SceneSurface};
use crate::color::Rgb;
use crate::surface::{DisplaySurface, Shape};

impl From<Rgb> for egui::Color32 {
    fn from(c: Rgb) -> Self {
        egui::Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// Theme passed during render.
#[derive(Clone, Debug)]
pub struct AquariumTheme {
    /// Overrides the scene's own background colour.
    pub background: Option<egui::Color32>,
    /// Peak tilt of swaying elements, in degrees.
    pub sway_degrees: f32,
}

impl Default for AquariumTheme {
    fn default() -> Self {
        Self {
            background: None,
            sway_degrees: 5.0,
        }
    }
}

pub struct AquariumWidget<'a> {
    pub scene: &'a SceneSurface,
    pub theme: &'a AquariumTheme,
}

impl<'a> AquariumWidget<'a> {
    pub fn new(scene: &'a SceneSurface, theme: &'a AquariumTheme) -> Self {
        Self { scene, theme }
    }
}

/// Horizontal offset of each line of a swaying element, bottom line first at zero.
fn sway_offsets(rows: usize, line_height: f32, tilt_radians: f32) -> Vec<f32> {
    let shear = tilt_radians.tan();
    (0..rows)
        .map(|row| {
            let above_base = (rows - 1 - row) as f32 * line_height;
            above_base * shear
        })
        .collect()
}

fn paint_element(
    painter: &egui::Painter,
    origin: egui::Pos2,
    scene: &SceneSurface,
    el: &Element,
    tilt_radians: f32,
) {
    let metrics = scene.metrics();
    let top_left = scene.top_left(el);
    let pos = origin + egui::vec2(top_left.x, top_left.y);
    let color: egui::Color32 = el.color.into();
    match &el.shape {
        Shape::Band { height } => {
            let rect = egui::Rect::from_min_size(pos, egui::vec2(scene.viewport().width, *height));
            painter.rect_filled(rect, 0.0, color);
        }
        Shape::Text(text) => {
            let font = egui::FontId::monospace(metrics.line_height);
            if el.sway.is_none() {
                painter.text(pos, egui::Align2::LEFT_TOP, text, font, color);
                return;
            }
            let lines: Vec<&str> = text.lines().collect();
            let offsets = sway_offsets(lines.len(), metrics.line_height, tilt_radians);
            for (row, (line, dx)) in lines.iter().zip(offsets).enumerate() {
                let p = pos + egui::vec2(dx, row as f32 * metrics.line_height);
                painter.text(p, egui::Align2::LEFT_TOP, line, font.clone(), color);
            }
        }
    }
}

impl<'a> egui::Widget for AquariumWidget<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let vp = self.scene.viewport();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(vp.width, vp.height), egui::Sense::hover());
        let painter = ui.painter_at(rect);

        let background = self
            .theme
            .background
            .unwrap_or_else(|| self.scene.background().into());
        painter.rect_filled(rect, 0.0, background);

        let time_ms = ui.input(|i| i.time) * 1000.0;
        for el in self.scene.elements() {
            let tilt = el
                .sway
                .map(|s| {
                    let phase = (time_ms / s.period_ms) * std::f64::consts::TAU;
                    self.theme.sway_degrees.to_radians() * phase.sin() as f32
                })
                .unwrap_or(0.0);
            paint_element(&painter, rect.min, self.scene, el, tilt);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sway_keeps_the_base_line_still() {
        let offsets = sway_offsets(3, 10.0, 0.1);
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[2], 0.0);
        assert!(offsets[0] > offsets[1] && offsets[1] > 0.0);
        assert!(sway_offsets(4, 10.0, 0.0).iter().all(|d| *d == 0.0));
    }

    #[test]
    fn rgb_converts_to_color32() {
        let c: egui::Color32 = Rgb(0, 100, 0).into();
        assert_eq!(c, egui::Color32::from_rgb(0, 100, 0));
    }
}
