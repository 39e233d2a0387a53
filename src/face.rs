use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::util::color::hex_color;

pub const EYE_SPACING_MIN: f32 = 50.0;
pub const EYE_SPACING_MAX: f32 = 800.0;

/// Which rendered copy of the shared eye shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeSide {
    /// Drawn as-is; handles are edited on this eye.
    Left,
    /// Drawn mirrored about its own origin.
    Right,
}

impl EyeSide {
    pub const BOTH: [EyeSide; 2] = [EyeSide::Left, EyeSide::Right];

    /// +1 for the left eye, -1 for the mirrored right eye.
    pub fn mirror(self) -> f32 {
        match self {
            EyeSide::Left => 1.0,
            EyeSide::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoseSettings {
    /// Vertical distance from the eye line to the nose center.
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(with = "hex_color")]
    pub color: Color32,
}

impl Default for NoseSettings {
    fn default() -> Self {
        Self {
            offset_y: 150.0,
            width: 44.0,
            height: 30.0,
            color: Color32::from_rgb(0xe8, 0x8f, 0x9a),
        }
    }
}

/// Maps between canvas coordinates, eye-pair coordinates and each eye's
/// local frame for one frame's canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    /// Midpoint between the two eye origins, in canvas coordinates.
    pub center: Pos2,
    pub eye_spacing: f32,
    pub nose: NoseSettings,
}

impl FaceLayout {
    pub fn new(canvas_size: Vec2, eye_spacing: f32, nose: NoseSettings) -> Self {
        Self {
            center: pos2(canvas_size.x / 2.0, canvas_size.y * 0.42),
            eye_spacing,
            nose,
        }
    }

    /// Origin of an eye's local frame in canvas coordinates.
    pub fn eye_origin(&self, side: EyeSide) -> Pos2 {
        let half = self.eye_spacing / 2.0;
        match side {
            EyeSide::Left => self.center - vec2(half, 0.0),
            EyeSide::Right => self.center + vec2(half, 0.0),
        }
    }

    pub fn to_world(&self, side: EyeSide, local: Pos2) -> Pos2 {
        let origin = self.eye_origin(side);
        pos2(origin.x + local.x * side.mirror(), origin.y + local.y)
    }

    pub fn to_local(&self, side: EyeSide, world: Pos2) -> Pos2 {
        let origin = self.eye_origin(side);
        pos2((world.x - origin.x) * side.mirror(), world.y - origin.y)
    }

    /// Canvas point expressed relative to the eye-pair midpoint.
    pub fn to_pair_space(&self, world: Pos2) -> Pos2 {
        (world - self.center).to_pos2()
    }

    pub fn nose_center(&self) -> Pos2 {
        self.center + vec2(0.0, self.nose.offset_y)
    }

    /// Click target that triggers a blink.
    pub fn nose_rect(&self) -> Rect {
        Rect::from_center_size(self.nose_center(), vec2(self.nose.width, self.nose.height))
    }

    /// Downward-pointing triangle, top edge first.
    pub fn nose_triangle(&self) -> [Pos2; 3] {
        let c = self.nose_center();
        let hw = self.nose.width / 2.0;
        let hh = self.nose.height / 2.0;
        [c + vec2(-hw, -hh), c + vec2(hw, -hh), c + vec2(0.0, hh)]
    }
}
