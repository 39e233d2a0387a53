use egui::Pos2;

use crate::config::HandleConfig;
use crate::eye::{ConstraintRing, Corner, EyePoint};
use crate::face::EyeSide;
use crate::geometry::hit_testing::{hits_point, hits_ring};
use crate::state::EditorState;

/// What a drag session moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    Nose,
    EyeSpacing,
    Point(EyePoint),
    Ring(ConstraintRing),
    /// Brush stroke over the fur in texture mode.
    Paint,
}

impl DragTarget {
    /// Targets that reshape the eye; locked while a blink runs.
    pub fn edits_eye_geometry(self) -> bool {
        matches!(self, DragTarget::Point(_) | DragTarget::Ring(_))
    }
}

/// Result of a pointer-down hit test in eye mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Drag(DragTarget),
    /// Nothing draggable, but the pointer is on the nose.
    Blink,
}

/// Center of the eye-spacing ring: the right eye's iris.
pub fn spacing_ring_center(state: &EditorState) -> Pos2 {
    state
        .layout()
        .to_world(EyeSide::Right, state.eye.shape().center())
}

/// Hit test in priority order: nose ring, eye-spacing ring, the six eye
/// points, iris-movement ring, anchor ring, then the nose box.
pub fn hit_test(state: &EditorState, config: &HandleConfig, pos: Pos2) -> Option<Hit> {
    let layout = state.layout();
    let r = config.handle_radius;

    if hits_ring(pos, layout.nose_center(), config.nose_ring_radius, r, config.ring_hit_factor) {
        return Some(Hit::Drag(DragTarget::Nose));
    }

    let eyeball_radius = state.eye.scale().eyeball_radius;
    if hits_ring(pos, spacing_ring_center(state), eyeball_radius, r, config.ring_hit_factor) {
        return Some(Hit::Drag(DragTarget::EyeSpacing));
    }

    let shape = state.eye.shape();
    let local = layout.to_local(EyeSide::Left, pos);
    if let Some(point) = EyePoint::ALL
        .into_iter()
        .find(|&p| hits_point(local, shape.point(p), r, config.point_hit_factor))
    {
        return Some(Hit::Drag(DragTarget::Point(point)));
    }

    let center = shape.center();
    let rings = [
        (ConstraintRing::IrisMovement, state.eye.scale().iris_limit_radius()),
        (ConstraintRing::Anchor, state.eye.anchor_radius()),
    ];
    for (ring, radius) in rings {
        if hits_ring(local, center, radius, r, config.ring_hit_factor) {
            return Some(Hit::Drag(DragTarget::Ring(ring)));
        }
    }

    layout.nose_rect().contains(pos).then_some(Hit::Blink)
}

/// The corner under `pos` on the edited eye, if any.
pub fn corner_at(state: &EditorState, config: &HandleConfig, pos: Pos2) -> Option<Corner> {
    let local = state.layout().to_local(EyeSide::Left, pos);
    let shape = state.eye.shape();
    Corner::ALL
        .into_iter()
        .find(|&c| hits_point(local, shape.corner(c), config.handle_radius, config.point_hit_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::ControlHandle;
    use egui::{vec2, Vec2};

    fn state() -> EditorState {
        EditorState::new(vec2(800.0, 600.0))
    }

    fn world(state: &EditorState, local: Pos2) -> Pos2 {
        state.layout().to_world(EyeSide::Left, local)
    }

    #[test]
    fn test_corner_hit() {
        let s = state();
        let pos = world(&s, s.eye.shape().inner_corner) + vec2(3.0, 0.0);
        assert_eq!(
            hit_test(&s, &HandleConfig::default(), pos),
            Some(Hit::Drag(DragTarget::Point(EyePoint::Corner(Corner::Inner))))
        );
    }

    #[test]
    fn test_handle_hit() {
        let s = state();
        let pos = world(&s, s.eye.shape().lower_lid.cp2);
        assert_eq!(
            hit_test(&s, &HandleConfig::default(), pos),
            Some(Hit::Drag(DragTarget::Point(EyePoint::Handle(ControlHandle::LowerOuter))))
        );
    }

    #[test]
    fn test_rings_hit_on_their_band() {
        let s = state();
        let center = s.eye.shape().center();
        let iris = world(&s, center + vec2(0.0, -s.eye.scale().iris_limit_radius()));
        assert_eq!(
            hit_test(&s, &HandleConfig::default(), iris),
            Some(Hit::Drag(DragTarget::Ring(ConstraintRing::IrisMovement)))
        );
        let anchor = world(&s, center + vec2(0.0, s.eye.anchor_radius()));
        assert_eq!(
            hit_test(&s, &HandleConfig::default(), anchor),
            Some(Hit::Drag(DragTarget::Ring(ConstraintRing::Anchor)))
        );
    }

    #[test]
    fn test_nose_ring_beats_nose_box() {
        let s = state();
        let config = HandleConfig::default();
        let nose = s.layout().nose_center();
        assert_eq!(
            hit_test(&s, &config, nose + vec2(config.nose_ring_radius, 0.0)),
            Some(Hit::Drag(DragTarget::Nose))
        );
        assert_eq!(hit_test(&s, &config, nose), Some(Hit::Blink));
    }

    #[test]
    fn test_spacing_ring_around_right_eye() {
        let s = state();
        let radius = s.eye.scale().eyeball_radius;
        let pos = spacing_ring_center(&s) + Vec2::new(0.0, -radius);
        assert_eq!(
            hit_test(&s, &HandleConfig::default(), pos),
            Some(Hit::Drag(DragTarget::EyeSpacing))
        );
    }

    #[test]
    fn test_empty_canvas_misses() {
        let s = state();
        assert_eq!(hit_test(&s, &HandleConfig::default(), Pos2::new(5.0, 590.0)), None);
    }
}
