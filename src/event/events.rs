use crate::export::ExportBundle;

/// Outbound notifications from the editor core to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A blink finished; fired once per session.
    BlinkCompleted,
    Exported(ExportBundle),
    ImportFailed(String),
    Imported,
    /// The set of painted colors may have changed.
    PaletteChanged,
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::BlinkCompleted => "blink_completed",
            EditorEvent::Exported(_) => "exported",
            EditorEvent::ImportFailed(_) => "import_failed",
            EditorEvent::Imported => "imported",
            EditorEvent::PaletteChanged => "palette_changed",
        }
    }
}
