use std::ops::RangeInclusive;
use std::path::PathBuf;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::brush::{BRUSH_SIZE_LIMIT, Brush, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::color::{PaletteEntry, default_palette, parse_color};
use crate::history::DEFAULT_HISTORY_DEPTH;

/// User-tunable editor settings.
///
/// Persisted by the app between runs; the artwork itself never is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // new fields fall back to their defaults when loading older settings
pub struct EditorConfig {
    /// Undo steps kept
    pub history_depth: usize,
    pub min_brush_size: u32,
    pub max_brush_size: u32,
    /// Brush size at startup
    pub brush_size: u32,
    /// Color at startup, anything `parse_color` accepts
    pub color: String,
    pub palette: Vec<PaletteEntry>,
    /// Where native builds write the export file
    pub export_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            min_brush_size: MIN_BRUSH_SIZE,
            max_brush_size: MAX_BRUSH_SIZE,
            brush_size: MIN_BRUSH_SIZE,
            color: "black".to_owned(),
            palette: default_palette(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Slider range, repaired if the stored bounds are inverted, zero or
    /// past [`BRUSH_SIZE_LIMIT`]
    pub fn brush_range(&self) -> RangeInclusive<u32> {
        let min = self.min_brush_size.clamp(1, BRUSH_SIZE_LIMIT);
        let max = self.max_brush_size.clamp(min, BRUSH_SIZE_LIMIT);
        min..=max
    }

    /// Starting brush. Falls back to black for an unparseable color.
    pub fn initial_brush(&self) -> Brush {
        let color = parse_color(&self.color).unwrap_or_else(|e| {
            log::warn!("{}, starting with black", e);
            Color32::BLACK
        });
        let range = self.brush_range();
        Brush::new(color, self.brush_size.clamp(*range.start(), *range.end()))
    }

    /// Palette swatches that parse
    pub fn palette_colors(&self) -> Vec<(String, Color32)> {
        self.palette
            .iter()
            .filter_map(|entry| entry.resolve().map(|color| (entry.name.clone(), color)))
            .collect()
    }
}
