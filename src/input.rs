use egui::{Context, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer input the editor reacts to, already translated into canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Primary button was released
    PointerUp { location: InputLocation },
    /// Pointer moved, with or without the primary button held
    PointerMove {
        location: InputLocation,
        primary_held: bool,
    },
    /// Pointer left the window
    PointerLeave { last_known_location: InputLocation },
    /// Double click / double tap
    DoubleClick { location: InputLocation },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerUp { location }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::DoubleClick { location } => *location,
            InputEvent::PointerLeave { last_known_location } => *last_known_location,
        }
    }

    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        self.location().is_in_canvas
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Creates a canvas-relative InputLocation from a screen position
    pub fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        primary_held: input.pointer.button_down(PointerButton::Primary),
                    });
                }
                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last),
                });
            }

            let Some(pos) = hover.or(input.pointer.interact_pos()) else {
                return;
            };
            let location = self.make_location(pos);
            if input.pointer.button_pressed(PointerButton::Primary) {
                events.push(InputEvent::PointerDown { location });
            }
            if input.pointer.button_double_clicked(PointerButton::Primary) {
                events.push(InputEvent::DoubleClick { location });
            }
            if input.pointer.button_released(PointerButton::Primary) {
                events.push(InputEvent::PointerUp { location });
            }
        });

        events
    }
}
