use egui::{Color32, Pos2, Vec2, pos2};

/// Smallest density that still yields a spacing.
pub const MIN_DENSITY: u32 = 2;

/// Paint state of one lattice point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurCell {
    pub uses_base_color: bool,
    pub custom_color: Color32,
}

impl Default for FurCell {
    fn default() -> Self {
        Self {
            uses_base_color: true,
            custom_color: Color32::BLACK,
        }
    }
}

/// Regular lattice of fur strokes, indexed `[col][row]`.
///
/// Orientation is not stored; it comes from noise at render time. Only the
/// paint state lives here and it persists until density changes or a reset.
#[derive(Debug, Clone, PartialEq)]
pub struct FurGrid {
    density: u32,
    canvas: Vec2,
    spacing: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<FurCell>>,
}

fn layout(density: u32, canvas: Vec2) -> (f32, usize, usize) {
    let rows = density.max(MIN_DENSITY) as usize;
    let height = (canvas.y - 1.0).max(1.0);
    let width = (canvas.x - 1.0).max(0.0);
    let spacing = height / (rows - 1) as f32;
    let cols = (width / spacing).floor() as usize + 1;
    (spacing, cols, rows)
}

impl FurGrid {
    pub fn new(density: u32, canvas: Vec2) -> Self {
        let density = density.max(MIN_DENSITY);
        let (spacing, cols, rows) = layout(density, canvas);
        log::debug!("Fur grid allocated: {cols}x{rows} cells, spacing {spacing:.2}");
        Self {
            density,
            canvas,
            spacing,
            cols,
            rows,
            cells: vec![vec![FurCell::default(); rows]; cols],
        }
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&FurCell> {
        self.cells.get(col).and_then(|c| c.get(row))
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut FurCell> {
        self.cells.get_mut(col).and_then(|c| c.get_mut(row))
    }

    /// Canvas position of a lattice point.
    pub fn cell_center(&self, col: usize, row: usize) -> Pos2 {
        pos2(col as f32 * self.spacing, row as f32 * self.spacing)
    }

    /// Every cell with its indices, column-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &FurCell)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(col, column)| column.iter().enumerate().map(move |(row, cell)| (col, row, cell)))
    }

    /// Reallocates (all cells back to base) if `density` differs.
    /// Returns whether a reallocation happened.
    pub fn set_density(&mut self, density: u32) -> bool {
        let density = density.max(MIN_DENSITY);
        if density == self.density {
            return false;
        }
        log::info!("Fur density {} -> {}, paint cleared", self.density, density);
        *self = Self::new(density, self.canvas);
        true
    }

    /// Adapts the lattice to a new canvas size, keeping the paint of every
    /// cell index present in both lattices.
    pub fn resize(&mut self, canvas: Vec2) {
        if canvas == self.canvas {
            return;
        }
        let mut resized = Self::new(self.density, canvas);
        for (col, row, cell) in self.iter() {
            if let Some(target) = resized.cell_mut(col, row) {
                *target = *cell;
            }
        }
        *self = resized;
    }

    /// Clears all paint, keeping the allocation.
    pub fn reset(&mut self) {
        for column in &mut self.cells {
            column.fill(FurCell::default());
        }
        log::info!("Fur paint reset");
    }

    /// Paints every lattice point within `radius` of `center`.
    /// Returns the number of cells touched.
    pub fn paint_at(&mut self, center: Pos2, radius: f32, color: Color32) -> usize {
        if radius < 0.0 || self.spacing <= 0.0 {
            return 0;
        }
        let last_col = self.cols as isize - 1;
        let last_row = self.rows as isize - 1;
        let min_col = ((center.x - radius) / self.spacing).floor().max(0.0) as isize;
        let max_col = (((center.x + radius) / self.spacing).ceil() as isize).min(last_col);
        let min_row = ((center.y - radius) / self.spacing).floor().max(0.0) as isize;
        let max_row = (((center.y + radius) / self.spacing).ceil() as isize).min(last_row);
        if min_col > max_col || min_row > max_row {
            return 0;
        }

        let radius_sq = radius * radius;
        let mut painted = 0;
        for col in min_col..=max_col {
            for row in min_row..=max_row {
                let (col, row) = (col as usize, row as usize);
                if (self.cell_center(col, row) - center).length_sq() <= radius_sq {
                    let cell = &mut self.cells[col][row];
                    cell.uses_base_color = false;
                    cell.custom_color = color;
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Rewrites every cell painted with `from` to `to`.
    pub fn replace_color(&mut self, from: Color32, to: Color32) -> usize {
        let mut replaced = 0;
        for column in &mut self.cells {
            for cell in column.iter_mut() {
                if !cell.uses_base_color && cell.custom_color == from {
                    cell.custom_color = to;
                    replaced += 1;
                }
            }
        }
        replaced
    }

    /// Distinct custom colors in use, in first-seen order.
    pub fn palette(&self) -> Vec<Color32> {
        let mut palette = Vec::new();
        for (_, _, cell) in self.iter() {
            if !cell.uses_base_color && !palette.contains(&cell.custom_color) {
                palette.push(cell.custom_color);
            }
        }
        palette
    }

    pub fn is_unpainted(&self) -> bool {
        self.iter().all(|(_, _, cell)| cell.uses_base_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_grid_dimensions() {
        let grid = FurGrid::new(60, vec2(801.0, 591.0));
        assert_eq!(grid.rows(), 60);
        assert!((grid.spacing() - 10.0).abs() < 1e-4);
        assert_eq!(grid.cols(), 81);
    }

    #[test]
    fn test_paint_outside_canvas_is_harmless() {
        let mut grid = FurGrid::new(20, vec2(400.0, 300.0));
        assert_eq!(grid.paint_at(pos2(-500.0, -500.0), 10.0, Color32::RED), 0);
        assert_eq!(grid.paint_at(pos2(5000.0, 5000.0), 10.0, Color32::RED), 0);
        assert!(grid.is_unpainted());
    }

    #[test]
    fn test_brush_is_circular() {
        let mut grid = FurGrid::new(60, vec2(801.0, 591.0));
        grid.paint_at(pos2(100.0, 100.0), 10.0, Color32::RED);
        // 10px spacing: the four axis neighbours are inside, the diagonals are not.
        assert!(!grid.cell(10, 10).unwrap().uses_base_color);
        assert!(!grid.cell(11, 10).unwrap().uses_base_color);
        assert!(!grid.cell(10, 9).unwrap().uses_base_color);
        assert!(grid.cell(11, 11).unwrap().uses_base_color);
    }

    #[test]
    fn test_palette_first_seen_order() {
        let mut grid = FurGrid::new(30, vec2(400.0, 300.0));
        grid.paint_at(pos2(300.0, 100.0), 20.0, Color32::BLUE);
        grid.paint_at(pos2(50.0, 100.0), 20.0, Color32::RED);
        assert_eq!(grid.palette(), vec![Color32::RED, Color32::BLUE]);
        grid.replace_color(Color32::RED, Color32::BLUE);
        assert_eq!(grid.palette(), vec![Color32::BLUE]);
    }

    #[test]
    fn test_resize_keeps_overlapping_paint() {
        let mut grid = FurGrid::new(30, vec2(400.0, 300.0));
        grid.paint_at(grid.cell_center(2, 3), 1.0, Color32::GREEN);
        grid.resize(vec2(600.0, 300.0));
        assert!(grid.cols() > 30);
        assert_eq!(grid.cell(2, 3).unwrap().custom_color, Color32::GREEN);
    }
}
