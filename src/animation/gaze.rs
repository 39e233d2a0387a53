use egui::{Pos2, Vec2, pos2, vec2};

use super::easing::Easing;
use crate::config::GazeConfig;
use crate::geometry::{clamp_length, lerp_vec};

/// Pupil offsets for both eyes, each in that eye's own (possibly mirrored)
/// local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PupilOffsets {
    pub left: Vec2,
    pub right: Vec2,
}

impl PupilOffsets {
    pub const ZERO: Self = Self {
        left: Vec2::ZERO,
        right: Vec2::ZERO,
    };

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            left: lerp_vec(self.left, other.left, t),
            right: lerp_vec(self.right, other.right, t),
        }
    }
}

/// Everything the engine reads each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeInputs {
    pub enabled: bool,
    /// Pointer or externally supplied point, relative to the eye-pair midpoint.
    /// `None` keeps the last target.
    pub target: Option<Pos2>,
    /// Iris center in the canonical eye's local frame.
    pub iris_center: Pos2,
    pub eye_spacing: f32,
    pub eyeball_radius: f32,
    pub iris_movement_limit_ratio: f32,
    pub iris_width: f32,
}

impl GazeInputs {
    pub fn max_offset(&self) -> f32 {
        (self.eyeball_radius * self.iris_movement_limit_ratio - self.iris_width / 2.0).max(0.0)
    }

    /// Iris centers of both eyes relative to the eye-pair midpoint.
    pub fn iris_positions(&self) -> (Pos2, Pos2) {
        let half = self.eye_spacing / 2.0;
        (
            pos2(-half + self.iris_center.x, self.iris_center.y),
            pos2(half - self.iris_center.x, self.iris_center.y),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GazeState {
    pub is_tracking: bool,
    pub current: PupilOffsets,
    pub target: PupilOffsets,
    pub start: PupilOffsets,
    pub ease_start_ms: Option<f64>,
}

/// Pupil tracking with eased engage/disengage transitions.
#[derive(Clone, Debug)]
pub struct GazeEngine {
    state: GazeState,
    config: GazeConfig,
}

impl GazeEngine {
    pub fn new(config: GazeConfig) -> Self {
        Self {
            state: GazeState::default(),
            config,
        }
    }

    pub fn state(&self) -> &GazeState {
        &self.state
    }

    pub fn offsets(&self) -> PupilOffsets {
        self.state.current
    }

    /// Per-eye target offsets for a gaze point, clamped to the movement limit.
    ///
    /// Each eye aims at the point from its own iris; the right eye's vector is
    /// mirrored into its flipped frame. Those two vectors already point inward
    /// for a target between the irises, so the eyes converge at the default
    /// gain of 1.0. Other gains exaggerate or soften the inward pull.
    pub fn target_offsets(&self, inputs: &GazeInputs, target: Pos2) -> PupilOffsets {
        let max = inputs.max_offset();
        let (left_iris, right_iris) = inputs.iris_positions();

        let mut left = target - left_iris;
        let toward_right = target - right_iris;
        let mut right = vec2(-toward_right.x, toward_right.y);

        let (lo, hi) = if left_iris.x < right_iris.x {
            (left_iris.x, right_iris.x)
        } else {
            (right_iris.x, left_iris.x)
        };
        if target.x > lo && target.x < hi {
            left.x *= self.config.convergence_gain;
            right.x *= self.config.convergence_gain;
        }

        PupilOffsets {
            left: clamp_length(left, max),
            right: clamp_length(right, max),
        }
    }

    /// Advances one frame and returns the offsets to draw.
    pub fn update(&mut self, inputs: &GazeInputs, now_ms: f64) -> PupilOffsets {
        if inputs.enabled != self.state.is_tracking {
            self.state.is_tracking = inputs.enabled;
            self.state.start = self.state.current;
            self.state.ease_start_ms = Some(now_ms);
            if !inputs.enabled {
                self.state.target = PupilOffsets::ZERO;
            }
            log::debug!("Pupil tracking {}", if inputs.enabled { "engaged" } else { "released" });
        }

        if inputs.enabled {
            if let Some(target) = inputs.target {
                self.state.target = self.target_offsets(inputs, target);
            }
        }

        if let Some(started) = self.state.ease_start_ms {
            let t = if self.config.ease_ms > 0.0 {
                ((now_ms - started) / self.config.ease_ms).clamp(0.0, 1.0) as f32
            } else {
                1.0
            };
            let eased = Easing::EaseInOut.apply(t);
            self.state.current = self.state.start.lerp(self.state.target, eased);
            if t >= 1.0 {
                self.state.ease_start_ms = None;
            }
        } else if self.state.is_tracking {
            self.state.current = self.state.target;
        } else {
            self.state.current = PupilOffsets::ZERO;
        }

        self.state.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(target: Pos2) -> GazeInputs {
        GazeInputs {
            enabled: true,
            target: Some(target),
            iris_center: Pos2::ZERO,
            eye_spacing: 300.0,
            eyeball_radius: 130.0,
            iris_movement_limit_ratio: 0.75,
            iris_width: 143.0,
        }
    }

    #[test]
    fn test_max_offset_never_negative() {
        let mut i = inputs(Pos2::ZERO);
        i.iris_width = 500.0;
        assert_eq!(i.max_offset(), 0.0);
    }

    #[test]
    fn test_far_right_target_looks_same_world_way() {
        let engine = GazeEngine::new(GazeConfig::default());
        let offsets = engine.target_offsets(&inputs(pos2(5000.0, 0.0)), pos2(5000.0, 0.0));
        // Left eye looks +x in its frame, the mirrored right eye -x in its frame.
        assert!(offsets.left.x > 0.0);
        assert!(offsets.right.x < 0.0);
    }

    #[test]
    fn test_target_between_eyes_converges() {
        let engine = GazeEngine::new(GazeConfig::default());
        let offsets = engine.target_offsets(&inputs(pos2(0.0, 40.0)), pos2(0.0, 40.0));
        assert!(offsets.left.x > 0.0);
        assert!(offsets.right.x > 0.0);
        assert!((offsets.left.x - offsets.right.x).abs() < 1e-4);
    }

    #[test]
    fn test_convergence_gain_scales_inward_pull() {
        // Left iris sits at x = -150, so this target is 20 px inward of it.
        let target = pos2(-130.0, 0.0);
        let neutral = GazeEngine::new(GazeConfig::default()).target_offsets(&inputs(target), target);
        assert!((neutral.left.x - 20.0).abs() < 1e-4);

        let soft = GazeEngine::new(GazeConfig {
            convergence_gain: 0.5,
            ..GazeConfig::default()
        })
        .target_offsets(&inputs(target), target);
        assert!((soft.left.x - 10.0).abs() < 1e-4);

        // Outside the irises the gain has no effect.
        let outside = pos2(-400.0, 0.0);
        let a = GazeEngine::new(GazeConfig::default()).target_offsets(&inputs(outside), outside);
        let b = GazeEngine::new(GazeConfig {
            convergence_gain: 0.5,
            ..GazeConfig::default()
        })
        .target_offsets(&inputs(outside), outside);
        assert_eq!(a, b);
    }
}
