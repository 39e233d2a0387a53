use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2, pos2, vec2};

use crate::animation::PupilOffsets;
use crate::config::EditorConfig;
use crate::eye::{Corner, EyePoint, EyeShape};
use crate::face::{EyeSide, FaceLayout};
use crate::fur::brush_preview;
use crate::geometry::clip::signed_area2;
use crate::geometry::triangulate::{clip_to_triangles, fill_mesh, triangulate};
use crate::interaction::spacing_ring_center;
use crate::state::{EditMode, EditorState};

const ELLIPSE_SEGMENTS: usize = 48;
/// Below this doubled area (px²) the lids count as shut.
const SHUT_AREA2: f32 = 1.0;
const OUTLINE_COLOR: Color32 = Color32::from_rgb(0x22, 0x1a, 0x14);
const PUPIL_COLOR: Color32 = Color32::from_rgb(0x0b, 0x08, 0x06);
const HANDLE_COLOR: Color32 = Color32::from_rgb(0x2b, 0x7b, 0xe4);
const RING_COLOR: Color32 = Color32::from_rgb(0x8a, 0x8a, 0x8a);

/// Everything that varies per frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub state: &'a EditorState,
    /// Rest shape, or the blink-blended shape while a blink runs.
    pub shape: &'a EyeShape,
    pub offsets: PupilOffsets,
    pub handle_opacity: f32,
    pub pointer: Option<Pos2>,
    /// False for the eye-only assembly.
    pub draw_fur: bool,
}

fn ellipse_points(center: Pos2, radii: Vec2) -> Vec<Pos2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let a = std::f32::consts::TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            center + vec2(a.cos() * radii.x, a.sin() * radii.y)
        })
        .collect()
}

/// Composites one frame, back to front, in canvas coordinates.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: EditorConfig,
}

impl Renderer {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, scene: &Scene<'_>) -> Vec<Shape> {
        let state = scene.state;
        let canvas = state.canvas_size();
        let texture = state.texture();
        let layout = state.layout();
        let mut shapes = Vec::new();

        shapes.push(Shape::rect_filled(
            Rect::from_min_size(Pos2::ZERO, canvas),
            0.0,
            texture.background_color,
        ));

        if scene.draw_fur {
            state.fur().draw_fur_pattern(texture, &mut shapes);
            state.fur().draw_edge_fur(
                canvas,
                texture.background_color,
                &self.config.edge_fur,
                &mut shapes,
            );
        }

        for side in EyeSide::BOTH {
            let offset = match side {
                EyeSide::Left => scene.offsets.left,
                EyeSide::Right => scene.offsets.right,
            };
            self.draw_eye(&layout, side, scene.shape, state.eyeball_color, offset, &mut shapes);
        }

        shapes.push(Shape::convex_polygon(
            layout.nose_triangle().to_vec(),
            state.nose.color,
            Stroke::NONE,
        ));

        if state.mode == EditMode::Eye && scene.handle_opacity > 0.0 {
            self.draw_handles(state, &layout, scene.handle_opacity, &mut shapes);
        }

        if scene.draw_fur && state.mode == EditMode::Texture {
            shapes.extend(brush_preview(scene.pointer, canvas, texture));
        }

        shapes
    }

    fn draw_eye(
        &self,
        layout: &FaceLayout,
        side: EyeSide,
        shape: &EyeShape,
        eyeball_color: Color32,
        offset: Vec2,
        out: &mut Vec<Shape>,
    ) {
        let outline = shape.outline();
        let to_world = |points: Vec<Pos2>| -> Vec<Pos2> {
            points.into_iter().map(|p| layout.to_world(side, p)).collect()
        };

        if signed_area2(&outline).abs() >= SHUT_AREA2 {
            let lid: Vec<[Pos2; 3]> = triangulate(&outline)
                .into_iter()
                .map(|t| t.map(|p| layout.to_world(side, p)))
                .collect();
            out.push(Shape::mesh(fill_mesh(lid.iter().map(|t| &t[..]), eyeball_color)));

            let iris = shape.iris;
            let pupil = shape.pupil;
            let discs = [
                (pos2(iris.x, iris.y), vec2(iris.w, iris.h) / 2.0, iris.color),
                (pos2(pupil.x, pupil.y), vec2(pupil.w, pupil.h) / 2.0, PUPIL_COLOR),
            ];
            for (center, radii, color) in discs {
                let disc = to_world(ellipse_points(center + offset, radii));
                let visible = clip_to_triangles(&disc, &lid);
                if !visible.is_empty() {
                    out.push(Shape::mesh(fill_mesh(visible.iter().map(Vec::as_slice), color)));
                }
            }
        }

        out.push(Shape::closed_line(
            to_world(outline),
            Stroke::new(3.0, OUTLINE_COLOR),
        ));
    }

    fn draw_handles(&self, state: &EditorState, layout: &FaceLayout, opacity: f32, out: &mut Vec<Shape>) {
        let config = &self.config.handles;
        let handle = HANDLE_COLOR.gamma_multiply(opacity);
        let ring = Stroke::new(1.5, RING_COLOR.gamma_multiply(opacity));
        let shape = state.eye.shape();
        let world = |p: Pos2| layout.to_world(EyeSide::Left, p);
        let center = world(shape.center());

        out.push(Shape::circle_stroke(center, state.eye.scale().iris_limit_radius(), ring));
        out.push(Shape::circle_stroke(center, state.eye.anchor_radius(), ring));
        out.push(Shape::circle_stroke(
            spacing_ring_center(state),
            state.eye.scale().eyeball_radius,
            ring,
        ));
        out.push(Shape::circle_stroke(layout.nose_center(), config.nose_ring_radius, ring));

        for corner in Corner::ALL {
            for h in corner.handles() {
                out.push(Shape::line_segment(
                    [world(shape.corner(corner)), world(shape.handle(h))],
                    Stroke::new(1.0, handle),
                ));
            }
        }

        for point in EyePoint::ALL {
            let pos = world(shape.point(point));
            match point {
                EyePoint::Corner(corner) if state.eye.linkage().is_linked(corner) => {
                    out.push(Shape::circle_filled(pos, config.handle_radius, handle));
                }
                _ => {
                    out.push(Shape::circle_filled(pos, config.handle_radius, Color32::WHITE.gamma_multiply(opacity)));
                    out.push(Shape::circle_stroke(pos, config.handle_radius, Stroke::new(1.5, handle)));
                }
            }
        }
    }
}
