//! Per-frame orchestration shared by both front-ends.

use egui::{Color32, Shape, Vec2};

use crate::animation::{BlinkController, BlinkStatus, BlinkTick, GazeEngine, GazeInputs, PupilOffsets};
use crate::config::EditorConfig;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::export::{ExportBundle, svg};
use crate::eye::EyeShape;
use crate::input::InputEvent;
use crate::interaction::{InteractionController, Reaction};
use crate::renderer::{Renderer, Scene};
use crate::state::{EditMode, EditorState, PersistenceResult, Requests, export_record, import_record};

/// Which front-end the editor core is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembly {
    /// Eyes, nose and the fur compositor.
    Full,
    /// Eye editing, blink and gaze only.
    EyeOnly,
}

impl Assembly {
    pub fn has_fur(self) -> bool {
        self == Assembly::Full
    }
}

#[derive(Debug)]
pub struct Editor {
    assembly: Assembly,
    state: EditorState,
    config: EditorConfig,
    blink: BlinkController,
    gaze: GazeEngine,
    interaction: InteractionController,
    renderer: Renderer,
    requests: Requests,
    events: EventBus,
    palette: Vec<Color32>,
    offsets: PupilOffsets,
}

impl Editor {
    pub fn new(assembly: Assembly, config: EditorConfig, canvas_size: Vec2) -> Self {
        Self {
            assembly,
            state: EditorState::new(canvas_size),
            blink: BlinkController::new(config.blink.clone()),
            gaze: GazeEngine::new(config.gaze.clone()),
            interaction: InteractionController::default(),
            renderer: Renderer::new(config.clone()),
            requests: Requests::default(),
            events: EventBus::new(),
            palette: Vec::new(),
            offsets: PupilOffsets::ZERO,
            config,
        }
    }

    pub fn assembly(&self) -> Assembly {
        self.assembly
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Texture mode only exists in the full assembly.
    pub fn set_mode(&mut self, mode: EditMode) {
        let mode = if self.assembly.has_fur() { mode } else { EditMode::Eye };
        if mode != self.state.mode {
            log::info!("Edit mode -> {}", mode.as_str());
            self.state.mode = mode;
        }
    }

    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.state.set_canvas_size(size);
    }

    pub fn blink_status(&self) -> BlinkStatus {
        self.blink.status()
    }

    pub fn trigger_blink(&mut self) -> bool {
        self.blink.trigger(self.state.eye.shape())
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn pupil_offsets(&self) -> PupilOffsets {
        self.offsets
    }

    /// Shape to draw this frame.
    pub fn effective_shape(&self) -> EyeShape {
        self.blink
            .effective_shape(self.state.eye.shape(), self.state.blink_ratio)
    }

    /// Painted colors in first-seen order, as of the last frame.
    pub fn palette(&self) -> &[Color32] {
        &self.palette
    }

    pub fn requests_mut(&mut self) -> &mut Requests {
        &mut self.requests
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Reaction {
        let reaction = self.interaction.handle_event(
            event,
            &mut self.state,
            &self.config.handles,
            self.blink.is_blinking(),
        );
        if reaction == Reaction::TriggerBlink {
            self.trigger_blink();
        }
        reaction
    }

    /// Serializes the current state and the eye geometry.
    pub fn export(&self) -> PersistenceResult<ExportBundle> {
        let layout = self.state.layout();
        Ok(ExportBundle {
            record_json: export_record(&self.state)?,
            svg: svg::eyes_svg(
                self.state.eye.shape(),
                self.state.eyeball_color,
                &layout,
                self.state.canvas_size(),
            ),
        })
    }

    fn handle_requests(&mut self) {
        if self.requests.export.take_unhandled().is_some() {
            match self.export() {
                Ok(bundle) => self.events.emit(EditorEvent::Exported(bundle)),
                Err(e) => log::error!("Export failed: {e}"),
            }
        }

        if let Some(text) = self.requests.import.take_unhandled().cloned() {
            match import_record(&mut self.state, &text) {
                Ok(()) => {
                    if !self.assembly.has_fur() {
                        self.state.mode = EditMode::Eye;
                    }
                    self.events.emit(EditorEvent::Imported);
                }
                Err(e) => self.events.emit(EditorEvent::ImportFailed(e.to_string())),
            }
        }

        if let Some(replace) = self.requests.palette_replace.take_unhandled().copied() {
            let n = self
                .state
                .fur_mut()
                .grid_mut()
                .replace_color(replace.from, replace.to);
            log::info!("Replaced {n} painted cells");
        }
    }

    fn refresh_palette(&mut self) {
        let palette = self.state.fur().grid().palette();
        if palette != self.palette {
            self.palette = palette;
            self.events.emit(EditorEvent::PaletteChanged);
        }
    }

    fn gaze_inputs(&self) -> GazeInputs {
        let layout = self.state.layout();
        let pointer = self
            .interaction
            .pointer_on_canvas()
            .map(|p| layout.to_pair_space(p));
        let scale = self.state.eye.scale();
        GazeInputs {
            enabled: self.state.pupil_tracking,
            target: pointer.or(self.state.gaze_target),
            iris_center: self.state.eye.shape().center(),
            eye_spacing: self.state.eye_spacing(),
            eyeball_radius: scale.eyeball_radius,
            iris_movement_limit_ratio: scale.iris_movement_limit_ratio,
            iris_width: self.state.eye.shape().iris.w,
        }
    }

    /// Advances every animation by one tick and composites the frame.
    pub fn frame(&mut self, now_ms: f64) -> Vec<Shape> {
        self.handle_requests();

        if self.blink.advance(now_ms) == BlinkTick::Completed {
            self.events.emit(EditorEvent::BlinkCompleted);
        }

        let inputs = self.gaze_inputs();
        self.offsets = self.gaze.update(&inputs, now_ms);

        let opacity = self
            .interaction
            .update_visibility(&self.state, &self.config.handles, now_ms);

        if self.assembly.has_fur() {
            self.refresh_palette();
        }

        let shape = self.effective_shape();
        self.renderer.render(&Scene {
            state: &self.state,
            shape: &shape,
            offsets: self.offsets,
            handle_opacity: opacity,
            pointer: self.interaction.pointer_on_canvas(),
            draw_fur: self.assembly.has_fur(),
        })
    }
}
