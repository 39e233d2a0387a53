//! Frame-stepped animations layered over the persistent eye parameters.

pub mod blink;
pub mod easing;
pub mod gaze;

pub use blink::{BlinkController, BlinkPhase, BlinkSession, BlinkStatus, BlinkTick};
pub use gaze::{GazeEngine, GazeInputs, GazeState, PupilOffsets};
