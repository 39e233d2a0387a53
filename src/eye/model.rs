use std::ops::RangeInclusive;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use super::shape::{ControlHandle, Corner, EyeShape};
use crate::geometry::{mirror_across_pivot, project_onto_circle};

pub const EYEBALL_RADIUS_RANGE: RangeInclusive<f32> = 50.0..=250.0;
pub const ANCHOR_RATIO_RANGE: RangeInclusive<f32> = 0.1..=1.0;
pub const SCALE_RATIO_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const PUPIL_WIDTH_RANGE: RangeInclusive<f32> = 0.1..=1.0;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Slider-driven sizing of the eye. Every ratio is a fraction of
/// `eyeball_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub eyeball_radius: f32,
    pub anchor_ratio: f32,
    /// Never below `iris_scale_ratio`.
    pub iris_movement_limit_ratio: f32,
    pub iris_scale_ratio: f32,
    pub pupil_scale_ratio: f32,
    /// Horizontal squash of the pupil; low values give a slit.
    pub pupil_width_ratio: f32,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            eyeball_radius: 130.0,
            anchor_ratio: 0.9,
            iris_movement_limit_ratio: 0.75,
            iris_scale_ratio: 0.55,
            pupil_scale_ratio: 0.3,
            pupil_width_ratio: 0.35,
        }
    }
}

impl ScaleParams {
    /// Pulls every field back inside its bounds.
    pub fn clamped(self) -> Self {
        let iris_scale_ratio = clamp_to(self.iris_scale_ratio, &SCALE_RATIO_RANGE);
        Self {
            eyeball_radius: clamp_to(self.eyeball_radius, &EYEBALL_RADIUS_RANGE),
            anchor_ratio: clamp_to(self.anchor_ratio, &ANCHOR_RATIO_RANGE),
            iris_movement_limit_ratio: clamp_to(
                self.iris_movement_limit_ratio,
                &(iris_scale_ratio..=1.0),
            ),
            iris_scale_ratio,
            pupil_scale_ratio: clamp_to(self.pupil_scale_ratio, &SCALE_RATIO_RANGE),
            pupil_width_ratio: clamp_to(self.pupil_width_ratio, &PUPIL_WIDTH_RANGE),
        }
    }

    pub fn anchor_radius(&self) -> f32 {
        self.eyeball_radius * self.anchor_ratio
    }

    pub fn iris_limit_radius(&self) -> f32 {
        self.eyeball_radius * self.iris_movement_limit_ratio
    }
}

/// Per-corner "smooth handle" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleLinkage {
    pub inner_linked: bool,
    pub outer_linked: bool,
}

impl HandleLinkage {
    pub fn is_linked(&self, corner: Corner) -> bool {
        match corner {
            Corner::Inner => self.inner_linked,
            Corner::Outer => self.outer_linked,
        }
    }

    fn flag_mut(&mut self, corner: Corner) -> &mut bool {
        match corner {
            Corner::Inner => &mut self.inner_linked,
            Corner::Outer => &mut self.outer_linked,
        }
    }
}

/// The two draggable constraint circles around the iris center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintRing {
    IrisMovement,
    Anchor,
}

/// Owns the canonical eye shape and keeps it consistent with the sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct EyeModel {
    shape: EyeShape,
    scale: ScaleParams,
    linkage: HandleLinkage,
}

impl Default for EyeModel {
    fn default() -> Self {
        Self::new(EyeShape::default(), ScaleParams::default(), HandleLinkage::default())
    }
}

impl EyeModel {
    pub fn new(shape: EyeShape, scale: ScaleParams, linkage: HandleLinkage) -> Self {
        let mut model = Self {
            shape,
            scale: scale.clamped(),
            linkage,
        };
        model.recompute_derived();
        model
    }

    pub fn shape(&self) -> &EyeShape {
        &self.shape
    }

    pub fn scale(&self) -> &ScaleParams {
        &self.scale
    }

    pub fn linkage(&self) -> HandleLinkage {
        self.linkage
    }

    pub fn anchor_radius(&self) -> f32 {
        self.scale.anchor_radius()
    }

    pub fn iris_radius(&self) -> f32 {
        self.shape.iris.w / 2.0
    }

    /// Largest pupil offset gaze tracking may apply.
    pub fn max_pupil_offset(&self) -> f32 {
        (self.scale.iris_limit_radius() - self.iris_radius()).max(0.0)
    }

    /// Applies new slider values (clamped) and re-derives the geometry.
    pub fn set_scale(&mut self, scale: ScaleParams) {
        let scale = scale.clamped();
        if scale != self.scale {
            self.scale = scale;
            self.recompute_derived();
        }
    }

    pub fn set_iris_color(&mut self, color: Color32) {
        self.shape.iris.color = color;
    }

    /// Re-derives iris and pupil sizes from the ratios, then snaps both corners
    /// back onto the anchor circle. Each corner's handles follow their corner
    /// rigidly so the lid shape is not distorted.
    pub fn recompute_derived(&mut self) {
        let r = self.scale.eyeball_radius;
        let iris_d = r * self.scale.iris_scale_ratio * 2.0;
        let pupil_d = r * self.scale.pupil_scale_ratio * 2.0;

        let shape = &mut self.shape;
        shape.iris.w = iris_d;
        shape.iris.h = iris_d;
        shape.pupil.x = shape.iris.x;
        shape.pupil.y = shape.iris.y;
        shape.pupil.w = pupil_d * self.scale.pupil_width_ratio;
        shape.pupil.h = pupil_d;

        let center = shape.center();
        let anchor = self.scale.anchor_radius();
        for corner in Corner::ALL {
            let old = shape.corner(corner);
            let projected = project_onto_circle(old, center, anchor);
            shape.shift_corner(corner, projected - old);
        }
    }

    /// Moves a corner along the anchor circle toward `raw`.
    pub fn drag_corner(&mut self, corner: Corner, raw: Pos2) {
        let old = self.shape.corner(corner);
        let projected = project_onto_circle(raw, self.shape.center(), self.anchor_radius());
        self.shape.shift_corner(corner, projected - old);
    }

    /// Places a control handle freely. With linkage on, the opposite handle is
    /// mirrored through the corner at its previous distance.
    pub fn drag_control_handle(&mut self, handle: ControlHandle, pos: Pos2) {
        let corner = self.shape.corner(handle.corner());
        let opposite = handle.opposite();
        let preserved = self.shape.handle(opposite).distance(corner);

        *self.shape.handle_mut(handle) = pos;

        if self.linkage.is_linked(handle.corner()) {
            if let Some(mirrored) = mirror_across_pivot(corner, pos, preserved) {
                *self.shape.handle_mut(opposite) = mirrored;
            }
        }
    }

    /// Resizes a constraint ring to `new_radius` (in local pixels).
    pub fn drag_constraint_ring(&mut self, ring: ConstraintRing, new_radius: f32) {
        let ratio = new_radius / self.scale.eyeball_radius;
        match ring {
            ConstraintRing::IrisMovement => {
                self.scale.iris_movement_limit_ratio =
                    clamp_to(ratio, &(self.scale.iris_scale_ratio..=1.0));
            }
            ConstraintRing::Anchor => {
                self.scale.anchor_ratio = clamp_to(ratio, &ANCHOR_RATIO_RANGE);
                self.recompute_derived();
            }
        }
    }

    /// Flips the linkage flag of `corner` and returns the new value.
    pub fn toggle_linkage(&mut self, corner: Corner) -> bool {
        let flag = self.linkage.flag_mut(corner);
        *flag = !*flag;
        log::info!("{} handle linkage {}", corner.as_str(), if *flag { "on" } else { "off" });
        *flag
    }

    pub fn set_linkage(&mut self, linkage: HandleLinkage) {
        self.linkage = linkage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_corners_sit_on_anchor_circle() {
        let model = EyeModel::default();
        let c = model.shape().center();
        for corner in Corner::ALL {
            let d = model.shape().corner(corner).distance(c);
            assert!((d - model.anchor_radius()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_limit_never_below_iris_scale() {
        let scale = ScaleParams {
            iris_scale_ratio: 0.6,
            iris_movement_limit_ratio: 0.2,
            ..ScaleParams::default()
        }
        .clamped();
        assert_eq!(scale.iris_movement_limit_ratio, 0.6);
    }

    #[test]
    fn test_out_of_range_sliders_clamp() {
        let scale = ScaleParams {
            eyeball_radius: 900.0,
            anchor_ratio: 0.0,
            pupil_width_ratio: f32::NAN,
            ..ScaleParams::default()
        }
        .clamped();
        assert_eq!(scale.eyeball_radius, 250.0);
        assert_eq!(scale.anchor_ratio, 0.1);
        assert_eq!(scale.pupil_width_ratio, 0.1);
    }

    #[test]
    fn test_iris_and_pupil_derive_from_ratios() {
        let model = EyeModel::default();
        let s = model.scale();
        assert!((model.shape().iris.w - s.eyeball_radius * s.iris_scale_ratio * 2.0).abs() < 1e-4);
        assert!((model.shape().pupil.h - s.eyeball_radius * s.pupil_scale_ratio * 2.0).abs() < 1e-4);
        assert!(model.shape().pupil.w < model.shape().pupil.h);
    }

    #[test]
    fn test_iris_ring_clamps_to_iris_scale() {
        let mut model = EyeModel::default();
        model.drag_constraint_ring(ConstraintRing::IrisMovement, 1.0);
        assert_eq!(model.scale().iris_movement_limit_ratio, model.scale().iris_scale_ratio);
        model.drag_constraint_ring(ConstraintRing::IrisMovement, 10_000.0);
        assert_eq!(model.scale().iris_movement_limit_ratio, 1.0);
        assert_eq!(model.max_pupil_offset(), model.scale().eyeball_radius - model.iris_radius());
    }

    #[test]
    fn test_toggle_linkage_leaves_geometry() {
        let mut model = EyeModel::default();
        let before = model.shape().clone();
        assert!(model.toggle_linkage(Corner::Outer));
        assert!(model.linkage().outer_linked);
        assert!(!model.linkage().inner_linked);
        assert_eq!(model.shape(), &before);
    }

    #[test]
    fn test_unlinked_handle_drag_leaves_opposite() {
        let mut model = EyeModel::default();
        let lower = model.shape().lower_lid.cp1;
        model.drag_control_handle(ControlHandle::UpperInner, pos2(40.0, -90.0));
        assert_eq!(model.shape().upper_lid.cp1, pos2(40.0, -90.0));
        assert_eq!(model.shape().lower_lid.cp1, lower);
    }
}
