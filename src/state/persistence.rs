use egui::Color32;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::EditorState;
use crate::export::color_map;
use crate::eye::{EyeModel, EyeShape, HandleLinkage, ScaleParams};
use crate::face::NoseSettings;
use crate::fur::{FurCompositor, TextureParameters};
use crate::util::color::hex_color;

/// The only save-record version this build reads and writes.
pub const RECORD_VERSION: u32 = 1;

/// Top-level keys every record must carry.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "version",
    "eyeState",
    "irisColor",
    "eyeballColor",
    "eyeballRadius",
    "eyeSpacing",
    "k_anchorConstraint",
    "l_irisConstraint",
    "m_irisScale",
    "n_pupilScale",
    "pupilWidthRatio",
    "noseSettings",
    "textureSettings",
    "colorMapDataUrl",
];

/// Errors that can occur while exporting or importing a save record
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Unsupported save version {0} (expected {})", RECORD_VERSION)]
    UnsupportedVersion(u32),

    #[error("Save record is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Malformed save record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fur color map: {0}")]
    ColorMap(String),

    #[error("Failed to access save file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Flat, versioned snapshot of everything the user shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    #[serde(rename = "eyeState")]
    pub eye_state: EyeShape,
    #[serde(rename = "irisColor", with = "hex_color")]
    pub iris_color: Color32,
    #[serde(rename = "eyeballColor", with = "hex_color")]
    pub eyeball_color: Color32,
    #[serde(rename = "eyeballRadius")]
    pub eyeball_radius: f32,
    #[serde(rename = "eyeSpacing")]
    pub eye_spacing: f32,
    #[serde(rename = "k_anchorConstraint")]
    pub anchor_ratio: f32,
    #[serde(rename = "l_irisConstraint")]
    pub iris_movement_limit_ratio: f32,
    #[serde(rename = "m_irisScale")]
    pub iris_scale_ratio: f32,
    #[serde(rename = "n_pupilScale")]
    pub pupil_scale_ratio: f32,
    #[serde(rename = "pupilWidthRatio")]
    pub pupil_width_ratio: f32,
    #[serde(rename = "noseSettings")]
    pub nose_settings: NoseSettings,
    #[serde(rename = "textureSettings")]
    pub texture_settings: TextureParameters,
    /// Empty when the fur carries no paint.
    #[serde(rename = "colorMapDataUrl")]
    pub color_map_data_url: String,
    #[serde(rename = "handleLinkage", default)]
    pub handle_linkage: HandleLinkage,
}

impl SaveRecord {
    /// Snapshots the current state.
    pub fn capture(state: &EditorState) -> PersistenceResult<Self> {
        let scale = state.eye.scale();
        let grid = state.fur().grid();
        let color_map_data_url = if grid.is_unpainted() {
            String::new()
        } else {
            color_map::encode_data_url(grid)?
        };
        Ok(Self {
            version: RECORD_VERSION,
            eye_state: state.eye.shape().clone(),
            iris_color: state.eye.shape().iris.color,
            eyeball_color: state.eyeball_color,
            eyeball_radius: scale.eyeball_radius,
            eye_spacing: state.eye_spacing(),
            anchor_ratio: scale.anchor_ratio,
            iris_movement_limit_ratio: scale.iris_movement_limit_ratio,
            iris_scale_ratio: scale.iris_scale_ratio,
            pupil_scale_ratio: scale.pupil_scale_ratio,
            pupil_width_ratio: scale.pupil_width_ratio,
            nose_settings: state.nose,
            texture_settings: state.texture().clone(),
            color_map_data_url,
            handle_linkage: state.eye.linkage(),
        })
    }

    pub fn to_json_pretty(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a record. Checks the version first, then the
    /// presence of every required field, then the field types.
    pub fn parse(text: &str) -> PersistenceResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        let version = value
            .get("version")
            .ok_or(PersistenceError::MissingField("version"))?;
        if let Some(version) = version.as_u64() {
            if version != u64::from(RECORD_VERSION) {
                return Err(PersistenceError::UnsupportedVersion(
                    u32::try_from(version).unwrap_or(u32::MAX),
                ));
            }
        }
        for field in REQUIRED_FIELDS {
            if value.get(field).is_none() {
                return Err(PersistenceError::MissingField(field));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Builds the replacement state. Session-only settings (mode, blink
    /// ratio, tracking) are carried over from `current`.
    pub fn into_state(self, current: &EditorState) -> PersistenceResult<EditorState> {
        let mut shape = self.eye_state;
        shape.iris.color = self.iris_color;
        let scale = ScaleParams {
            eyeball_radius: self.eyeball_radius,
            anchor_ratio: self.anchor_ratio,
            iris_movement_limit_ratio: self.iris_movement_limit_ratio,
            iris_scale_ratio: self.iris_scale_ratio,
            pupil_scale_ratio: self.pupil_scale_ratio,
            pupil_width_ratio: self.pupil_width_ratio,
        };
        let eye = EyeModel::new(shape, scale, self.handle_linkage);

        let texture = self.texture_settings.clamped();
        let mut fur = FurCompositor::new(texture.density, current.canvas_size());
        if !self.color_map_data_url.is_empty() {
            let image = color_map::decode_data_url(&self.color_map_data_url)?;
            let painted = color_map::apply(&image, fur.grid_mut());
            log::debug!("Restored {painted} painted fur cells");
        }

        Ok(EditorState::from_parts(
            current,
            eye,
            self.eyeball_color,
            self.eye_spacing,
            self.nose_settings,
            texture,
            fur,
        ))
    }
}

/// Serializes `state` as a pretty-printed save record.
pub fn export_record(state: &EditorState) -> PersistenceResult<String> {
    SaveRecord::capture(state)?.to_json_pretty()
}

/// Replaces `state` with the record in `text`. On any error `state` is left
/// exactly as it was.
pub fn import_record(state: &mut EditorState, text: &str) -> PersistenceResult<()> {
    let record = SaveRecord::parse(text)?;
    let new_state = record.into_state(state)?;
    *state = new_state;
    log::info!("Imported save record");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_record(state: &EditorState, path: impl AsRef<std::path::Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    std::fs::write(path, export_record(state)?)?;
    log::info!("Saved record to {}", path.display());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_record(state: &mut EditorState, path: impl AsRef<std::path::Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    import_record(state, &text)?;
    log::info!("Loaded record from {}", path.display());
    Ok(())
}
