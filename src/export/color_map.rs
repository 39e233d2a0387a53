//! Flat color map of the fur paint: one pixel per grid cell, painted cells
//! opaque in their custom color, unpainted cells fully transparent.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use egui::Color32;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::fur::FurGrid;
use crate::state::{PersistenceError, PersistenceResult};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub fn render(grid: &FurGrid) -> RgbaImage {
    let mut image = RgbaImage::new(grid.cols() as u32, grid.rows() as u32);
    for (col, row, cell) in grid.iter() {
        if !cell.uses_base_color {
            let [r, g, b, _] = cell.custom_color.to_srgba_unmultiplied();
            image.put_pixel(col as u32, row as u32, Rgba([r, g, b, 255]));
        }
    }
    image
}

/// PNG bytes of the grid's color map wrapped in a data URL.
pub fn encode_data_url(grid: &FurGrid) -> PersistenceResult<String> {
    let mut bytes = Vec::new();
    render(grid)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PersistenceError::ColorMap(e.to_string()))?;
    Ok(format!("{DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(bytes)))
}

pub fn decode_data_url(url: &str) -> PersistenceResult<RgbaImage> {
    let payload = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| PersistenceError::ColorMap("expected a base64 PNG data URL".to_string()))?;
    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| PersistenceError::ColorMap(e.to_string()))?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|e| PersistenceError::ColorMap(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Writes the map's opaque pixels into `grid` as paint and returns how many
/// cells were painted.
///
/// The row count is fixed by density, so a map with a different height
/// belongs to another density and is dropped. A different width only means
/// the canvas was resized in between: cells present in both are copied, the
/// same way `FurGrid::resize` keeps overlapping paint.
pub fn apply(image: &RgbaImage, grid: &mut FurGrid) -> usize {
    if image.height() as usize != grid.rows() {
        log::warn!(
            "Color map has {} rows but the fur grid has {}; paint dropped",
            image.height(),
            grid.rows()
        );
        return 0;
    }
    if image.width() as usize != grid.cols() {
        log::debug!(
            "Color map is {} columns wide, grid {}; copying the overlap",
            image.width(),
            grid.cols()
        );
    }
    let mut painted = 0;
    for (x, y, pixel) in image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        if a == 0 {
            continue;
        }
        if let Some(cell) = grid.cell_mut(x as usize, y as usize) {
            cell.uses_base_color = false;
            cell.custom_color = Color32::from_rgb(r, g, b);
            painted += 1;
        }
    }
    painted
}
