use serde::{Deserialize, Serialize};

use crate::geometry::hit_testing::{POINT_HIT_FACTOR, RING_HIT_FACTOR};

/// Tunables for every animated or interactive subsystem.
///
/// Persisted with the app; fields missing from an older save fall back to
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub blink: BlinkConfig,
    pub gaze: GazeConfig,
    pub handles: HandleConfig,
    pub edge_fur: EdgeFurConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Progress added per frame while closing.
    pub close_speed: f32,
    /// Progress removed per frame while opening.
    pub open_speed: f32,
    /// How long the lids stay shut, in milliseconds.
    pub hold_ms: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            close_speed: 0.12,
            open_speed: 0.2,
            hold_ms: 90.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Length of the ease when tracking is switched on or off.
    pub ease_ms: f64,
    /// Scales the inward horizontal pull when the target sits between the eyes.
    /// 1.0 leaves the per-eye aim untouched, which already converges.
    pub convergence_gain: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            ease_ms: 300.0,
            convergence_gain: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    /// Drawn radius of point handles.
    pub handle_radius: f32,
    pub point_hit_factor: f32,
    pub ring_hit_factor: f32,
    /// Handles show while the pointer is within this many eyeball radii of the eye.
    pub show_radius_factor: f32,
    pub nose_show_radius: f32,
    pub nose_ring_radius: f32,
    /// Opacity change per frame.
    pub fade_step: f32,
    /// Handles stay visible this long after the pointer leaves.
    pub grace_ms: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            handle_radius: 6.0,
            point_hit_factor: POINT_HIT_FACTOR,
            ring_hit_factor: RING_HIT_FACTOR,
            show_radius_factor: 2.5,
            nose_show_radius: 80.0,
            nose_ring_radius: 28.0,
            fade_step: 0.1,
            grace_ms: 2000.0,
        }
    }
}

/// Fixed stroke field masking fur at the canvas border.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeFurConfig {
    /// Width of the band as a fraction of the canvas width.
    pub margin_ratio: f32,
    pub spacing: f32,
    pub stroke_length: f32,
    pub stroke_weight: f32,
    pub noise_scale: f32,
}

impl Default for EdgeFurConfig {
    fn default() -> Self {
        Self {
            margin_ratio: 0.05,
            spacing: 4.0,
            stroke_length: 14.0,
            stroke_weight: 3.0,
            noise_scale: 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_faster_than_close() {
        let blink = BlinkConfig::default();
        assert!(blink.open_speed > blink.close_speed);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"gaze": {"ease_ms": 150.0}}"#).unwrap();
        assert_eq!(config.gaze.ease_ms, 150.0);
        assert_eq!(config.gaze.convergence_gain, 1.0);
        assert_eq!(config.blink, BlinkConfig::default());
    }
}
