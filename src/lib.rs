#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod config;
pub mod editor;
pub mod event;
pub mod export;
pub mod eye;
pub mod face;
pub mod fur;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod util;

pub use app::CatSketchApp;
pub use config::EditorConfig;
pub use editor::{Assembly, Editor};
pub use event::EditorEvent;
pub use eye::{EyeModel, EyeShape};
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use state::{EditMode, EditorState};
