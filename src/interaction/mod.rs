//! Routes pointer input to the eye model, the face layout and the fur grid.

mod hit;
mod visibility;

pub use hit::{DragTarget, Hit, corner_at, hit_test, spacing_ring_center};
pub use visibility::HandleVisibility;

use egui::Pos2;

use crate::config::HandleConfig;
use crate::eye::{Corner, EyePoint};
use crate::face::EyeSide;
use crate::input::InputEvent;
use crate::state::{EditMode, EditorState};

/// An active drag. Exactly one exists between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    pub last: Pos2,
}

/// What the editor must do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    TriggerBlink,
    DragStarted(DragTarget),
    DragEnded(DragTarget),
    LinkageToggled(Corner, bool),
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: Option<DragSession>,
    pointer: Option<Pos2>,
    pointer_in_canvas: bool,
    visibility: HandleVisibility,
}

impl InteractionController {
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Last pointer position while it is over the canvas.
    pub fn pointer_on_canvas(&self) -> Option<Pos2> {
        self.pointer.filter(|_| self.pointer_in_canvas)
    }

    pub fn visibility(&self) -> &HandleVisibility {
        &self.visibility
    }

    pub fn update_visibility(
        &mut self,
        state: &EditorState,
        config: &HandleConfig,
        now_ms: f64,
    ) -> f32 {
        let pointer = self.pointer_on_canvas();
        let dragging = self.is_dragging();
        self.visibility.update(state, config, pointer, dragging, now_ms)
    }

    /// Applies one input event. `blinking` locks eye geometry edits and the
    /// linkage toggle.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        state: &mut EditorState,
        config: &HandleConfig,
        blinking: bool,
    ) -> Reaction {
        match event {
            InputEvent::PointerMove { location, .. } => {
                self.pointer = Some(location.position);
                self.pointer_in_canvas = location.is_in_canvas;
                self.drag_to(location.position, state);
                Reaction::None
            }
            InputEvent::PointerDown { location } => {
                self.pointer = Some(location.position);
                self.pointer_in_canvas = location.is_in_canvas;
                if !location.is_in_canvas || self.drag.is_some() {
                    return Reaction::None;
                }
                self.pointer_down(location.position, state, config, blinking)
            }
            InputEvent::PointerUp { .. } => match self.drag.take() {
                Some(session) => {
                    log::debug!("Drag ended: {:?}", session.target);
                    Reaction::DragEnded(session.target)
                }
                None => Reaction::None,
            },
            InputEvent::PointerLeave { .. } => {
                self.pointer_in_canvas = false;
                Reaction::None
            }
            InputEvent::DoubleClick { location } => {
                if blinking || state.mode != EditMode::Eye || !location.is_in_canvas {
                    return Reaction::None;
                }
                match corner_at(state, config, location.position) {
                    Some(corner) => {
                        let linked = state.eye.toggle_linkage(corner);
                        Reaction::LinkageToggled(corner, linked)
                    }
                    None => Reaction::None,
                }
            }
        }
    }

    fn pointer_down(
        &mut self,
        pos: Pos2,
        state: &mut EditorState,
        config: &HandleConfig,
        blinking: bool,
    ) -> Reaction {
        let target = match state.mode {
            EditMode::Texture => DragTarget::Paint,
            EditMode::Eye => match hit_test(state, config, pos) {
                Some(Hit::Drag(target)) if blinking && target.edits_eye_geometry() => {
                    log::debug!("Eye geometry locked while blinking");
                    return Reaction::None;
                }
                Some(Hit::Drag(target)) => target,
                Some(Hit::Blink) => return Reaction::TriggerBlink,
                None => return Reaction::None,
            },
        };

        log::debug!("Drag started: {target:?}");
        self.drag = Some(DragSession { target, last: pos });
        if target == DragTarget::Paint {
            let texture = state.texture().clone();
            state.fur_mut().paint_at(pos, &texture);
        }
        Reaction::DragStarted(target)
    }

    fn drag_to(&mut self, pos: Pos2, state: &mut EditorState) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let layout = state.layout();
        let local = layout.to_local(EyeSide::Left, pos);

        match session.target {
            DragTarget::Nose => {
                state.nose.offset_y = (pos.y - layout.center.y).max(0.0);
            }
            DragTarget::EyeSpacing => {
                let dx = pos.x - session.last.x;
                state.set_eye_spacing(state.eye_spacing() + 2.0 * dx);
            }
            DragTarget::Point(EyePoint::Corner(corner)) => state.eye.drag_corner(corner, local),
            DragTarget::Point(EyePoint::Handle(handle)) => {
                state.eye.drag_control_handle(handle, local)
            }
            DragTarget::Ring(ring) => {
                let radius = local.distance(state.eye.shape().center());
                state.eye.drag_constraint_ring(ring, radius);
            }
            DragTarget::Paint => {
                let texture = state.texture().clone();
                state.fur_mut().paint_at(pos, &texture);
            }
        }
        session.last = pos;
    }
}
