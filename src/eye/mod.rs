//! Bezier eye geometry and the constraints that keep it well formed.

mod model;
mod shape;

pub use model::{
    ANCHOR_RATIO_RANGE, ConstraintRing, EYEBALL_RADIUS_RANGE, EyeModel, HandleLinkage,
    PUPIL_WIDTH_RANGE, SCALE_RATIO_RANGE, ScaleParams,
};
pub use shape::{ControlHandle, Corner, EyePoint, EyeShape, Iris, LidCurve, Pupil};
