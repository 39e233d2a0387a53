use egui::Pos2;

use crate::config::HandleConfig;
use crate::face::EyeSide;
use crate::state::EditorState;

/// Fading opacity of the on-canvas handles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleVisibility {
    opacity: f32,
    should_show: bool,
    last_in_zone_ms: Option<f64>,
}

impl HandleVisibility {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn should_show(&self) -> bool {
        self.should_show
    }

    /// True when `pointer` is close enough to an eye or the nose to want the
    /// handles.
    pub fn in_zone(state: &EditorState, config: &HandleConfig, pointer: Pos2) -> bool {
        let layout = state.layout();
        let eye_reach = state.eye.scale().eyeball_radius * config.show_radius_factor;
        let center = state.eye.shape().center();
        let near_eye = EyeSide::BOTH
            .into_iter()
            .any(|side| pointer.distance(layout.to_world(side, center)) < eye_reach);
        near_eye || pointer.distance(layout.nose_center()) < config.nose_show_radius
    }

    /// Steps the fade by one frame.
    pub fn update(
        &mut self,
        state: &EditorState,
        config: &HandleConfig,
        pointer: Option<Pos2>,
        dragging: bool,
        now_ms: f64,
    ) -> f32 {
        let in_zone = dragging || pointer.is_some_and(|p| Self::in_zone(state, config, p));
        if in_zone {
            self.last_in_zone_ms = Some(now_ms);
        }
        self.should_show = in_zone
            || self
                .last_in_zone_ms
                .is_some_and(|t| now_ms - t < config.grace_ms);

        let target = if self.should_show { 1.0 } else { 0.0 };
        if self.opacity < target {
            self.opacity = (self.opacity + config.fade_step).min(target);
        } else if self.opacity > target {
            self.opacity = (self.opacity - config.fade_step).max(target);
        }
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_fades_in_near_eye_and_out_after_grace() {
        let state = EditorState::new(vec2(800.0, 600.0));
        let config = HandleConfig::default();
        let eye = state.layout().eye_origin(EyeSide::Left);
        let mut vis = HandleVisibility::default();

        for i in 0..10 {
            vis.update(&state, &config, Some(eye), false, i as f64 * 16.0);
        }
        assert!((vis.opacity() - 1.0).abs() < 1e-4);

        // Leaves the zone: grace keeps the handles up.
        let far = pos2(-1000.0, -1000.0);
        vis.update(&state, &config, Some(far), false, 1000.0);
        assert!(vis.should_show());
        assert!((vis.opacity() - 1.0).abs() < 1e-4);

        let mut now = 144.0 + config.grace_ms + 1.0;
        for _ in 0..10 {
            vis.update(&state, &config, Some(far), false, now);
            now += 16.0;
        }
        assert!(!vis.should_show());
        assert!(vis.opacity().abs() < 1e-4);
    }

    #[test]
    fn test_dragging_keeps_handles_visible() {
        let state = EditorState::new(vec2(800.0, 600.0));
        let mut vis = HandleVisibility::default();
        vis.update(&state, &HandleConfig::default(), None, true, 0.0);
        assert!(vis.should_show());
        assert!(vis.opacity() > 0.0);
    }
}
