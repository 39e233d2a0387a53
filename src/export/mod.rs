//! Everything that leaves the editor as a file.

pub mod color_map;
pub mod svg;

/// Result of an export request, handed to the UI for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    /// Pretty-printed save record.
    pub record_json: String,
    /// Eye geometry only.
    pub svg: String,
}
