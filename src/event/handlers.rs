use crate::event::{EditorEvent, EventHandler};

/// Writes every editor event to the log
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::ImportFailed(reason) => log::warn!("Import failed: {reason}"),
            EditorEvent::Exported(bundle) => {
                log::info!("Exported record ({} bytes)", bundle.record_json.len())
            }
            other => log::debug!("Editor event: {}", other.name()),
        }
    }
}
