use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use super::grid::FurGrid;
use super::noise::PerlinNoise;
use crate::config::EdgeFurConfig;
use crate::util::color::hex_color;

/// User-facing fur sliders and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureParameters {
    pub density: u32,
    pub stroke_length: f32,
    pub angle_noise_scale: f32,
    pub stroke_weight: f32,
    pub brush_radius: f32,
    #[serde(with = "hex_color")]
    pub brush_color: Color32,
    #[serde(with = "hex_color")]
    pub base_color: Color32,
    #[serde(with = "hex_color")]
    pub background_color: Color32,
}

impl Default for TextureParameters {
    fn default() -> Self {
        Self {
            density: 60,
            stroke_length: 18.0,
            angle_noise_scale: 120.0,
            stroke_weight: 4.0,
            brush_radius: 20.0,
            brush_color: Color32::from_rgb(0x5a, 0x3a, 0x22),
            base_color: Color32::from_rgb(0xc8, 0x88, 0x4a),
            background_color: Color32::from_rgb(0xf4, 0xe9, 0xd8),
        }
    }
}

impl TextureParameters {
    pub fn clamped(mut self) -> Self {
        self.density = self.density.clamp(super::grid::MIN_DENSITY, 400);
        self.stroke_length = self.stroke_length.max(0.0);
        self.angle_noise_scale = self.angle_noise_scale.max(1.0);
        self.stroke_weight = self.stroke_weight.max(0.1);
        self.brush_radius = self.brush_radius.max(0.0);
        self
    }
}

fn oriented_stroke(center: Pos2, length: f32, angle: f32, stroke: Stroke) -> Shape {
    let half = vec2(angle.cos(), angle.sin()) * (length / 2.0);
    Shape::line_segment([center - half, center + half], stroke)
}

/// Paintable fur lattice plus the noise field that orients it.
#[derive(Debug, Clone, PartialEq)]
pub struct FurCompositor {
    grid: FurGrid,
    noise: PerlinNoise,
}

impl FurCompositor {
    pub fn new(density: u32, canvas: Vec2) -> Self {
        Self {
            grid: FurGrid::new(density, canvas),
            noise: PerlinNoise::default(),
        }
    }

    pub fn grid(&self) -> &FurGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut FurGrid {
        &mut self.grid
    }

    /// Regrids when the density slider moved. Other parameters never touch
    /// the paint state.
    pub fn sync(&mut self, params: &TextureParameters, canvas: Vec2) -> bool {
        self.grid.resize(canvas);
        self.grid.set_density(params.density)
    }

    pub fn paint_at(&mut self, pos: Pos2, params: &TextureParameters) -> usize {
        self.grid.paint_at(pos, params.brush_radius, params.brush_color)
    }

    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Stroke angle at a canvas position, in `[0, π]`.
    pub fn angle_at(&self, pos: Pos2, noise_scale: f32) -> f32 {
        let scale = noise_scale.max(1.0);
        std::f32::consts::PI * self.noise.unit(pos.x / scale, pos.y / scale)
    }

    /// One oriented stroke per grid cell.
    pub fn draw_fur_pattern(&self, params: &TextureParameters, out: &mut Vec<Shape>) {
        out.reserve(self.grid.cols() * self.grid.rows());
        for (col, row, cell) in self.grid.iter() {
            let center = self.grid.cell_center(col, row);
            let color = if cell.uses_base_color {
                params.base_color
            } else {
                cell.custom_color
            };
            let angle = self.angle_at(center, params.angle_noise_scale);
            out.push(oriented_stroke(
                center,
                params.stroke_length,
                angle,
                Stroke::new(params.stroke_weight, color),
            ));
        }
    }

    /// Background-colored strokes along all four canvas edges, hiding fur
    /// that overflows the border.
    pub fn draw_edge_fur(
        &self,
        canvas: Vec2,
        background: Color32,
        config: &EdgeFurConfig,
        out: &mut Vec<Shape>,
    ) {
        let margin = canvas.x * config.margin_ratio;
        if margin <= 0.0 || config.spacing <= 0.0 {
            return;
        }
        let inner = Rect::from_min_max(pos2(margin, margin), pos2(canvas.x - margin, canvas.y - margin));
        let stroke = Stroke::new(config.stroke_weight, background);

        let mut y = 0.0;
        while y <= canvas.y {
            let mut x = 0.0;
            while x <= canvas.x {
                let pos = pos2(x, y);
                if !inner.contains(pos) {
                    let angle = self.angle_at(pos, config.noise_scale);
                    out.push(oriented_stroke(pos, config.stroke_length, angle, stroke));
                }
                x += config.spacing;
            }
            y += config.spacing;
        }
    }
}

/// Outline of the brush under the pointer, if the pointer is on the canvas.
pub fn brush_preview(pointer: Option<Pos2>, canvas: Vec2, params: &TextureParameters) -> Option<Shape> {
    let pos = pointer?;
    let area = Rect::from_min_size(Pos2::ZERO, canvas);
    if !area.contains(pos) {
        return None;
    }
    Some(Shape::circle_stroke(
        pos,
        params.brush_radius,
        Stroke::new(1.5, Color32::from_black_alpha(180)),
    ))
}
