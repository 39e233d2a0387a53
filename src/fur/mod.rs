//! Procedural fur: a paintable lattice of noise-oriented strokes.

pub mod compositor;
pub mod grid;
pub mod noise;

pub use compositor::{FurCompositor, TextureParameters, brush_preview};
pub use grid::{FurCell, FurGrid, MIN_DENSITY};
pub use noise::PerlinNoise;
