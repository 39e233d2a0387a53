use egui::Color32;

/// A pending cross-boundary request: the UI writes a fresh id, the render loop
/// handles each id at most once, and the UI clears the slot when it is done.
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    pending: Option<(u64, T)>,
    next_id: u64,
    last_handled: u64,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_id: 1,
            last_handled: 0,
        }
    }
}

impl<T> RequestSlot<T> {
    /// Posts a request and returns its id. Replaces any unhandled request.
    pub fn post(&mut self, payload: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some((id, payload));
        id
    }

    /// Returns the payload if its id has not been handled yet, and marks it
    /// handled. The payload stays in the slot until `clear`.
    pub fn take_unhandled(&mut self) -> Option<&T> {
        match &self.pending {
            Some((id, payload)) if *id > self.last_handled => {
                self.last_handled = *id;
                Some(payload)
            }
            _ => None,
        }
    }

    pub fn pending_id(&self) -> Option<u64> {
        self.pending.as_ref().map(|(id, _)| *id)
    }

    pub fn is_handled(&self) -> bool {
        self.pending
            .as_ref()
            .is_none_or(|(id, _)| *id <= self.last_handled)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Rewrites every fur cell painted `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteReplace {
    pub from: Color32,
    pub to: Color32,
}

/// All request slots the UI can post into.
#[derive(Debug, Clone, Default)]
pub struct Requests {
    pub export: RequestSlot<()>,
    /// JSON text of a save record.
    pub import: RequestSlot<String>,
    pub palette_replace: RequestSlot<PaletteReplace>,
}
