use std::collections::VecDeque;

use crate::event::{EditorEvent, EventHandler};

/// Broadcasts editor events to registered handlers and queues them for the
/// UI to drain once per frame.
pub struct EventBus {
    handlers: Vec<Box<dyn EventHandler>>,
    pending: VecDeque<EditorEvent>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.len()))
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Emit an event to all registered handlers and queue it
    pub fn emit(&mut self, event: EditorEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
        self.pending.push_back(event);
    }

    /// Takes every queued event, oldest first
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        self.pending.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
