mod editor_state;
mod persistence;
mod requests;

pub use editor_state::{DEFAULT_BLINK_RATIO, DEFAULT_EYE_SPACING, EditMode, EditorState};
pub use persistence::{
    PersistenceError, PersistenceResult, RECORD_VERSION, REQUIRED_FIELDS, SaveRecord,
    export_record, import_record,
};
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::{load_record, save_record};
pub use requests::{PaletteReplace, RequestSlot, Requests};
