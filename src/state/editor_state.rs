//! The owned editor state every subsystem reads once per frame.
//!
//! Sliders, pointer handlers and import all mutate this one struct between
//! frames; the render loop only reads it (paint strokes aside, which write
//! into the fur grid in place).

use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::eye::EyeModel;
use crate::face::{EYE_SPACING_MAX, EYE_SPACING_MIN, FaceLayout, NoseSettings};
use crate::fur::{FurCompositor, TextureParameters};

/// Which layer pointer input edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Eye,
    Texture,
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Eye => "eye",
            EditMode::Texture => "texture",
        }
    }
}

pub const DEFAULT_EYE_SPACING: f32 = 300.0;
pub const DEFAULT_BLINK_RATIO: f32 = 0.47;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub mode: EditMode,
    pub eye: EyeModel,
    pub eyeball_color: Color32,
    eye_spacing: f32,
    pub nose: NoseSettings,
    texture: TextureParameters,
    /// 0 closes onto the lower lid's curvature, 1 onto the upper lid's.
    pub blink_ratio: f32,
    pub pupil_tracking: bool,
    /// Externally supplied gaze target in eye-pair space; the pointer wins
    /// while it is over the canvas.
    pub gaze_target: Option<Pos2>,
    canvas_size: Vec2,
    fur: FurCompositor,
}

impl EditorState {
    pub fn new(canvas_size: Vec2) -> Self {
        let texture = TextureParameters::default();
        Self {
            mode: EditMode::default(),
            eye: EyeModel::default(),
            eyeball_color: Color32::from_rgb(0xfb, 0xf8, 0xee),
            eye_spacing: DEFAULT_EYE_SPACING,
            nose: NoseSettings::default(),
            fur: FurCompositor::new(texture.density, canvas_size),
            texture,
            blink_ratio: DEFAULT_BLINK_RATIO,
            pupil_tracking: false,
            gaze_target: None,
            canvas_size,
        }
    }

    pub fn eye_spacing(&self) -> f32 {
        self.eye_spacing
    }

    pub fn set_eye_spacing(&mut self, spacing: f32) {
        self.eye_spacing = if spacing.is_nan() {
            EYE_SPACING_MIN
        } else {
            spacing.clamp(EYE_SPACING_MIN, EYE_SPACING_MAX)
        };
    }

    pub fn texture(&self) -> &TextureParameters {
        &self.texture
    }

    /// Applies new fur parameters; only a density change clears the paint.
    pub fn set_texture(&mut self, texture: TextureParameters) {
        self.texture = texture.clamped();
        self.fur.sync(&self.texture, self.canvas_size);
    }

    pub fn fur(&self) -> &FurCompositor {
        &self.fur
    }

    pub fn fur_mut(&mut self) -> &mut FurCompositor {
        &mut self.fur
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Adapts canvas-dependent state to a resized drawing area.
    pub fn set_canvas_size(&mut self, size: Vec2) {
        if size == self.canvas_size || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        log::debug!("Canvas resized to {:.0}x{:.0}", size.x, size.y);
        self.canvas_size = size;
        self.fur.sync(&self.texture, size);
    }

    pub fn layout(&self) -> FaceLayout {
        FaceLayout::new(self.canvas_size, self.eye_spacing, self.nose)
    }

    pub(crate) fn from_parts(
        carry: &EditorState,
        eye: EyeModel,
        eyeball_color: Color32,
        eye_spacing: f32,
        nose: NoseSettings,
        texture: TextureParameters,
        fur: FurCompositor,
    ) -> Self {
        let mut state = Self {
            mode: carry.mode,
            eye,
            eyeball_color,
            eye_spacing,
            nose,
            texture: texture.clamped(),
            blink_ratio: carry.blink_ratio,
            pupil_tracking: carry.pupil_tracking,
            gaze_target: carry.gaze_target,
            canvas_size: carry.canvas_size,
            fur,
        };
        state.set_eye_spacing(eye_spacing);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_mode_names() {
        assert_eq!(EditMode::Eye.as_str(), "eye");
        assert_eq!(serde_json::to_string(&EditMode::Texture).unwrap(), "\"texture\"");
    }

    #[test]
    fn test_eye_spacing_clamps() {
        let mut state = EditorState::new(vec2(800.0, 600.0));
        state.set_eye_spacing(10.0);
        assert_eq!(state.eye_spacing(), EYE_SPACING_MIN);
        state.set_eye_spacing(5000.0);
        assert_eq!(state.eye_spacing(), EYE_SPACING_MAX);
    }

    #[test]
    fn test_texture_change_keeps_paint_unless_density_moves() {
        let mut state = EditorState::new(vec2(800.0, 600.0));
        let params = state.texture().clone();
        state.fur_mut().paint_at(pos2(100.0, 100.0), &params);

        state.set_texture(TextureParameters {
            stroke_length: 30.0,
            ..params.clone()
        });
        assert!(!state.fur().grid().is_unpainted());

        state.set_texture(TextureParameters {
            density: params.density / 2,
            ..params
        });
        assert!(state.fur().grid().is_unpainted());
    }
}
