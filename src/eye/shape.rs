use egui::{Color32, Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::bezier::{CURVE_SEGMENTS, flatten_closed};
use crate::util::color::hex_color;

/// One of the two eye corners shared by both lid curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Toward the nose.
    Inner,
    Outer,
}

impl Corner {
    pub const ALL: [Corner; 2] = [Corner::Inner, Corner::Outer];

    /// The two control handles that hang off this corner.
    pub fn handles(self) -> [ControlHandle; 2] {
        match self {
            Corner::Inner => [ControlHandle::UpperInner, ControlHandle::LowerInner],
            Corner::Outer => [ControlHandle::UpperOuter, ControlHandle::LowerOuter],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::Inner => "inner",
            Corner::Outer => "outer",
        }
    }
}

/// The four bezier control points of the two lids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlHandle {
    /// `upper_lid.cp1`
    UpperInner,
    /// `lower_lid.cp1`
    LowerInner,
    /// `upper_lid.cp2`
    UpperOuter,
    /// `lower_lid.cp2`
    LowerOuter,
}

impl ControlHandle {
    pub const ALL: [ControlHandle; 4] = [
        ControlHandle::UpperInner,
        ControlHandle::LowerInner,
        ControlHandle::UpperOuter,
        ControlHandle::LowerOuter,
    ];

    pub fn corner(self) -> Corner {
        match self {
            ControlHandle::UpperInner | ControlHandle::LowerInner => Corner::Inner,
            ControlHandle::UpperOuter | ControlHandle::LowerOuter => Corner::Outer,
        }
    }

    /// The handle on the other lid at the same corner.
    pub fn opposite(self) -> ControlHandle {
        match self {
            ControlHandle::UpperInner => ControlHandle::LowerInner,
            ControlHandle::LowerInner => ControlHandle::UpperInner,
            ControlHandle::UpperOuter => ControlHandle::LowerOuter,
            ControlHandle::LowerOuter => ControlHandle::UpperOuter,
        }
    }
}

/// Any of the six draggable geometry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyePoint {
    Corner(Corner),
    Handle(ControlHandle),
}

impl EyePoint {
    /// Corners first, then handles; this is also the hit-test order.
    pub const ALL: [EyePoint; 6] = [
        EyePoint::Corner(Corner::Inner),
        EyePoint::Corner(Corner::Outer),
        EyePoint::Handle(ControlHandle::UpperInner),
        EyePoint::Handle(ControlHandle::LowerInner),
        EyePoint::Handle(ControlHandle::UpperOuter),
        EyePoint::Handle(ControlHandle::LowerOuter),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidCurve {
    pub cp1: Pos2,
    pub cp2: Pos2,
}

impl LidCurve {
    pub fn translate(&mut self, delta: Vec2) {
        self.cp1 += delta;
        self.cp2 += delta;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Iris {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(with = "hex_color")]
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pupil {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Geometry of one eye in its own local frame. The second eye is this
/// shape mirrored horizontally.
///
/// The upper lid runs inner corner → outer corner through `cp1`, `cp2`; the
/// lower lid shares both endpoints and is walked backwards to close the
/// outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeShape {
    pub inner_corner: Pos2,
    pub outer_corner: Pos2,
    pub upper_lid: LidCurve,
    pub lower_lid: LidCurve,
    pub iris: Iris,
    pub pupil: Pupil,
}

impl Default for EyeShape {
    /// Unprojected starting layout; `EyeModel` snaps it onto the anchor circle.
    fn default() -> Self {
        let inner = pos2(110.0, 18.0);
        let outer = pos2(-110.0, -12.0);
        Self {
            inner_corner: inner,
            outer_corner: outer,
            upper_lid: LidCurve {
                cp1: inner + vec2(-30.0, -75.0),
                cp2: outer + vec2(40.0, -85.0),
            },
            lower_lid: LidCurve {
                cp1: inner + vec2(-30.0, 50.0),
                cp2: outer + vec2(40.0, 60.0),
            },
            iris: Iris {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
                color: Color32::from_rgb(0xe0, 0xa0, 0x30),
            },
            pupil: Pupil {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
            },
        }
    }
}

impl EyeShape {
    /// Iris center; pivot for corner projection and gaze offsets.
    pub fn center(&self) -> Pos2 {
        pos2(self.iris.x, self.iris.y)
    }

    pub fn corner(&self, corner: Corner) -> Pos2 {
        match corner {
            Corner::Inner => self.inner_corner,
            Corner::Outer => self.outer_corner,
        }
    }

    pub fn corner_mut(&mut self, corner: Corner) -> &mut Pos2 {
        match corner {
            Corner::Inner => &mut self.inner_corner,
            Corner::Outer => &mut self.outer_corner,
        }
    }

    pub fn handle(&self, handle: ControlHandle) -> Pos2 {
        match handle {
            ControlHandle::UpperInner => self.upper_lid.cp1,
            ControlHandle::LowerInner => self.lower_lid.cp1,
            ControlHandle::UpperOuter => self.upper_lid.cp2,
            ControlHandle::LowerOuter => self.lower_lid.cp2,
        }
    }

    pub fn handle_mut(&mut self, handle: ControlHandle) -> &mut Pos2 {
        match handle {
            ControlHandle::UpperInner => &mut self.upper_lid.cp1,
            ControlHandle::LowerInner => &mut self.lower_lid.cp1,
            ControlHandle::UpperOuter => &mut self.upper_lid.cp2,
            ControlHandle::LowerOuter => &mut self.lower_lid.cp2,
        }
    }

    pub fn point(&self, point: EyePoint) -> Pos2 {
        match point {
            EyePoint::Corner(c) => self.corner(c),
            EyePoint::Handle(h) => self.handle(h),
        }
    }

    /// Moves a corner and carries both of its handles along.
    pub fn shift_corner(&mut self, corner: Corner, delta: Vec2) {
        *self.corner_mut(corner) += delta;
        for handle in corner.handles() {
            *self.handle_mut(handle) += delta;
        }
    }

    pub fn upper_curve(&self) -> [Pos2; 4] {
        [
            self.inner_corner,
            self.upper_lid.cp1,
            self.upper_lid.cp2,
            self.outer_corner,
        ]
    }

    pub fn lower_curve(&self) -> [Pos2; 4] {
        [
            self.outer_corner,
            self.lower_lid.cp2,
            self.lower_lid.cp1,
            self.inner_corner,
        ]
    }

    /// Closed lid outline as a polyline in local coordinates.
    pub fn outline(&self) -> Vec<Pos2> {
        flatten_closed(&[self.upper_curve(), self.lower_curve()], CURVE_SEGMENTS)
    }
}
