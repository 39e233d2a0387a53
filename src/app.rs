use egui::{Rect, Vec2};

use crate::config::EditorConfig;
use crate::editor::{Assembly, Editor};
use crate::event::{EditorEvent, LogEventHandler};
use crate::export::ExportBundle;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::state::{export_record, import_record};

const INITIAL_CANVAS: Vec2 = Vec2::new(800.0, 600.0);

/// What survives a restart. Stored through eframe's persistence.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedSession {
    pub config: EditorConfig,
    /// Last save record, in the same format as exported files.
    pub record: Option<String>,
    /// Canvas size the record was captured at.
    pub canvas_size: Option<Vec2>,
}

/// The eframe front-end over one shared `Editor`.
pub struct CatSketchApp {
    editor: Editor,
    input: InputHandler,
    storage_key: &'static str,
    status: Option<String>,
    last_export: Option<ExportBundle>,
    /// Path used by the native save/load buttons.
    pub file_path: String,
}

impl CatSketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, assembly: Assembly) -> Self {
        let storage_key = match assembly {
            Assembly::Full => eframe::APP_KEY,
            Assembly::EyeOnly => "eye_editor",
        };
        let session: PersistedSession = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, storage_key))
            .unwrap_or_default();

        let mut app = Self::with_session(assembly, session, storage_key);
        log::info!("{assembly:?} editor started");
        app.status = Some("Ready".to_string());
        app
    }

    pub fn with_session(assembly: Assembly, session: PersistedSession, storage_key: &'static str) -> Self {
        let canvas_size = session
            .canvas_size
            .filter(|size| size.x > 0.0 && size.y > 0.0)
            .unwrap_or(INITIAL_CANVAS);
        let mut editor = Editor::new(assembly, session.config, canvas_size);
        editor.subscribe(Box::new(LogEventHandler));
        if let Some(record) = session.record {
            if let Err(e) = import_record(editor.state_mut(), &record) {
                log::warn!("Discarding stored session: {e}");
            }
        }
        Self {
            editor,
            input: InputHandler::new(Rect::from_min_size(egui::Pos2::ZERO, canvas_size)),
            storage_key,
            status: None,
            last_export: None,
            file_path: "cat_sketch.json".to_string(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn last_export(&self) -> Option<&ExportBundle> {
        self.last_export.as_ref()
    }

    /// Feeds this frame's pointer input to the editor.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            self.editor.handle_input(&event);
        }
    }

    /// Reacts to what the editor reported during the last frame.
    pub fn process_events(&mut self) {
        for event in self.editor.drain_events() {
            match event {
                EditorEvent::BlinkCompleted => {}
                EditorEvent::Exported(bundle) => {
                    self.status = Some("Exported".to_string());
                    self.editor.requests_mut().export.clear();
                    self.last_export = Some(bundle);
                }
                EditorEvent::ImportFailed(reason) => {
                    self.status = Some(format!("Import failed: {reason}"));
                    self.editor.requests_mut().import.clear();
                }
                EditorEvent::Imported => {
                    self.status = Some("Imported".to_string());
                    self.editor.requests_mut().import.clear();
                }
                EditorEvent::PaletteChanged => {
                    self.editor.requests_mut().palette_replace.clear();
                }
            }
        }
    }
}

impl eframe::App for CatSketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let record = match export_record(self.editor.state()) {
            Ok(record) => Some(record),
            Err(e) => {
                log::error!("Could not snapshot session: {e}");
                None
            }
        };
        let session = PersistedSession {
            config: self.editor.config().clone(),
            record,
            canvas_size: Some(self.editor.state().canvas_size()),
        };
        eframe::set_value(storage, self.storage_key, &session);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.process_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_session_restores_at_saved_canvas_size() {
        let size = vec2(1020.0, 700.0);
        let mut state = crate::state::EditorState::new(size);
        let texture = state.texture().clone();
        state.fur_mut().paint_at(pos2(990.0, 300.0), &texture);

        let session = PersistedSession {
            config: EditorConfig::default(),
            record: Some(export_record(&state).unwrap()),
            canvas_size: Some(size),
        };
        let app = CatSketchApp::with_session(Assembly::Full, session, eframe::APP_KEY);

        assert_eq!(app.editor().state().canvas_size(), size);
        assert_eq!(app.editor().state().fur().grid(), state.fur().grid());
    }

    #[test]
    fn test_session_without_size_uses_default_canvas() {
        let app = CatSketchApp::with_session(Assembly::EyeOnly, PersistedSession::default(), "eye_editor");
        assert_eq!(app.editor().state().canvas_size(), INITIAL_CANVAS);
    }
}
