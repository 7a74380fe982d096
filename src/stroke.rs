use egui::Color32;

use crate::brush::Brush;
use crate::surface::CellPos;

/// The pointer-down-to-up interaction currently in progress.
///
/// Only lives while the pointer is held; the surface is painted as samples
/// arrive, so nothing here is needed to replay the stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    brush: Brush,
    cells: Vec<CellPos>,
}

impl Stroke {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            cells: Vec::new(),
        }
    }

    /// Record a sampled pointer cell
    pub fn add_cell(&mut self, cell: CellPos) {
        self.cells.push(cell);
    }

    /// Brush the stroke started with. Palette changes mid-stroke update it.
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub(crate) fn set_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    pub(crate) fn set_size(&mut self, size: u32) {
        self.brush.size = size;
    }

    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    pub fn last_cell(&self) -> Option<CellPos> {
        self.cells.last().copied()
    }
}
