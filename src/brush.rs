use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::surface::{CellPos, GRID_CELLS, Surface};

/// Smallest and largest size the brush slider offers
pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 10;

/// Hard ceiling for a configured brush size. A disk this wide already covers
/// the whole grid from any cell on it.
pub const BRUSH_SIZE_LIMIT: u32 = GRID_CELLS * 3;

/// The paint brush: an active color and a stamp size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Current brush color
    pub color: Color32,
    /// Slider value. Sizes above 1 stamp a disk of radius `size / 2`.
    pub size: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            size: MIN_BRUSH_SIZE,
        }
    }
}

impl Brush {
    pub fn new(color: Color32, size: u32) -> Self {
        Self { color, size }
    }

    /// Radius of the disk stamp; zero for the single-cell stamp
    pub fn radius(&self) -> i32 {
        if self.size <= 1 {
            0
        } else {
            (self.size / 2) as i32
        }
    }

    /// Cells covered by one stamp centered on `center`
    pub fn stamp(&self, center: CellPos) -> Vec<CellPos> {
        if self.size <= 1 {
            return vec![center];
        }
        disk_cells(center, self.radius())
    }

    /// Stamp onto the surface, returning the cells that were filled
    pub fn paint(&self, surface: &mut Surface, center: CellPos) -> Vec<CellPos> {
        let cells = self.stamp(center);
        for cell in &cells {
            surface.fill_cell(*cell, self.color);
        }
        cells
    }
}

/// Every cell with `dx² + dy² <= r²` around `center`, row by row.
///
/// The inclusion test is the plain integer one, so a radius-1 disk is a plus
/// sign rather than a 3x3 block.
pub fn disk_cells(center: CellPos, radius: i32) -> Vec<CellPos> {
    let r2 = i64::from(radius) * i64::from(radius);
    let mut cells = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) <= r2 {
                cells.push(center.offset(dx, dy));
            }
        }
    }
    cells
}
