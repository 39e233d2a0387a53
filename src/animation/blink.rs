use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::easing::Easing;
use crate::config::BlinkConfig;
use crate::eye::{Corner, EyeShape};
use crate::geometry::{from_polar, lerp_angle, lerp_pos, polar_offset};

/// Status string reported to the UI layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlinkStatus {
    #[default]
    Idle,
    Blinking,
}

impl BlinkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BlinkStatus::Idle => "idle",
            BlinkStatus::Blinking => "blinking",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Closing,
    Holding,
    Opening,
}

impl BlinkPhase {
    fn name(self) -> &'static str {
        match self {
            BlinkPhase::Closing => "closing",
            BlinkPhase::Holding => "holding",
            BlinkPhase::Opening => "opening",
        }
    }
}

/// A running blink. Exists from trigger until the lids are fully open again.
#[derive(Clone, Debug)]
pub struct BlinkSession {
    phase: BlinkPhase,
    progress: f32,
    start_shape: EyeShape,
    hold_started_ms: Option<f64>,
}

impl BlinkSession {
    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// 0 = open, 1 = shut.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn start_shape(&self) -> &EyeShape {
        &self.start_shape
    }
}

/// Outcome of advancing the blink by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkTick {
    Idle,
    Running,
    /// The session just ended; reported exactly once.
    Completed,
}

/// Idle → Closing → Holding → Opening → Idle.
#[derive(Clone, Debug)]
pub struct BlinkController {
    session: Option<BlinkSession>,
    config: BlinkConfig,
}

impl BlinkController {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            session: None,
            config,
        }
    }

    pub fn status(&self) -> BlinkStatus {
        if self.session.is_some() {
            BlinkStatus::Blinking
        } else {
            BlinkStatus::Idle
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&BlinkSession> {
        self.session.as_ref()
    }

    /// Starts a blink from a snapshot of `shape`. Ignored while one is running.
    pub fn trigger(&mut self, shape: &EyeShape) -> bool {
        if self.session.is_some() {
            log::debug!("Blink trigger ignored, already blinking");
            return false;
        }
        self.session = Some(BlinkSession {
            phase: BlinkPhase::Closing,
            progress: 0.0,
            start_shape: shape.clone(),
            hold_started_ms: None,
        });
        log::info!("Blink started");
        true
    }

    /// Steps the state machine by one frame.
    pub fn advance(&mut self, now_ms: f64) -> BlinkTick {
        let Some(session) = self.session.as_mut() else {
            return BlinkTick::Idle;
        };

        match session.phase {
            BlinkPhase::Closing => {
                session.progress += self.config.close_speed;
                if session.progress >= 1.0 {
                    session.progress = 1.0;
                    session.phase = BlinkPhase::Holding;
                    session.hold_started_ms = Some(now_ms);
                    log::debug!("Blink phase -> {}", session.phase.name());
                }
            }
            BlinkPhase::Holding => {
                let started = *session.hold_started_ms.get_or_insert(now_ms);
                if now_ms - started >= self.config.hold_ms {
                    session.phase = BlinkPhase::Opening;
                    log::debug!("Blink phase -> {}", session.phase.name());
                }
            }
            BlinkPhase::Opening => {
                session.progress -= self.config.open_speed;
                if session.progress <= 0.0 {
                    self.session = None;
                    log::info!("Blink completed");
                    return BlinkTick::Completed;
                }
            }
        }
        BlinkTick::Running
    }

    /// Shape to draw this frame: the rest shape when idle, otherwise the
    /// snapshot blended toward the closed lid line.
    pub fn effective_shape(&self, rest: &EyeShape, blink_ratio: f32) -> EyeShape {
        match &self.session {
            Some(session) => blink_shape(&session.start_shape, session.progress, blink_ratio),
            None => rest.clone(),
        }
    }
}

/// Where both handles of `corner` meet when the eye is shut: a polar blend of
/// the lower (`ratio = 0`) and upper (`ratio = 1`) handle offsets.
pub fn closed_handle_target(shape: &EyeShape, corner: Corner, ratio: f32) -> Pos2 {
    let origin = shape.corner(corner);
    let [upper, lower] = corner.handles();
    let (r_upper, a_upper) = polar_offset(origin, shape.handle(upper));
    let (r_lower, a_lower) = polar_offset(origin, shape.handle(lower));
    let radius = r_lower + (r_upper - r_lower) * ratio;
    let angle = lerp_angle(a_lower, a_upper, ratio);
    from_polar(origin, radius, angle)
}

/// Blends `start` toward the closed configuration at blink `progress`.
/// Corners, iris and pupil are left untouched.
pub fn blink_shape(start: &EyeShape, progress: f32, blink_ratio: f32) -> EyeShape {
    let ratio = blink_ratio.clamp(0.0, 1.0);
    let eased = Easing::Cosine.apply(progress);
    let mut shape = start.clone();
    for corner in Corner::ALL {
        let target = closed_handle_target(start, corner, ratio);
        for handle in corner.handles() {
            *shape.handle_mut(handle) = lerp_pos(start.handle(handle), target, eased);
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::EyeModel;

    #[test]
    fn test_blink_ratio_picks_lid() {
        let shape = EyeModel::default().shape().clone();
        let lower = closed_handle_target(&shape, Corner::Inner, 0.0);
        let upper = closed_handle_target(&shape, Corner::Inner, 1.0);
        assert!((lower - shape.lower_lid.cp1).length() < 1e-3);
        assert!((upper - shape.upper_lid.cp1).length() < 1e-3);
    }

    #[test]
    fn test_zero_progress_is_start_shape() {
        let shape = EyeModel::default().shape().clone();
        assert_eq!(blink_shape(&shape, 0.0, 0.47), shape);
    }

    #[test]
    fn test_second_trigger_ignored() {
        let shape = EyeModel::default().shape().clone();
        let mut blink = BlinkController::new(BlinkConfig::default());
        assert!(blink.trigger(&shape));
        assert!(!blink.trigger(&shape));
        assert_eq!(blink.status(), BlinkStatus::Blinking);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BlinkStatus::Blinking).unwrap(), "\"blinking\"");
        assert_eq!(serde_json::to_string(&BlinkStatus::Idle).unwrap(), "\"idle\"");
    }
}
