//! The editor core: one surface, one brush, one history, driven by
//! [`EditorAction`]s.
//!
//! ```text
//!            PointerDown (snapshot, draw)
//!   ┌──────┐ ───────────────────────────► ┌─────────┐
//!   │ Idle │                              │ Drawing │ ◄─┐ PointerMove (draw)
//!   └──────┘ ◄─────────────────────────── └─────────┘ ──┘
//!      ▲  │          PointerUp
//!      └──┘ Click (draw, no snapshot)
//! ```
//!
//! Undo and redo hand back a [`PendingRestore`]. The editor keeps at most one
//! in flight and settles it before anything else touches the surface, so
//! back-to-back history commands always see each other's results.

use std::ops::RangeInclusive;

use egui::Color32;

use crate::brush::Brush;
use crate::color::BACKGROUND;
use crate::config::EditorConfig;
use crate::error::ExportError;
use crate::export::{ExportRecord, ExportSink, export_surface};
use crate::history::{PendingRestore, RestoreKind, SnapshotHistory};
use crate::input::{EditorAction, KeyCommand};
use crate::state::EditorState;
use crate::stroke::Stroke;
use crate::surface::{CellPos, Surface};

#[derive(Debug)]
pub struct Editor {
    surface: Surface,
    history: SnapshotHistory,
    brush: Brush,
    brush_range: RangeInclusive<u32>,
    state: EditorState,
    pending_restore: Option<PendingRestore>,
    clear_prompt_open: bool,
    /// Bumped whenever the surface pixels change
    revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            surface: Surface::new(BACKGROUND),
            history: SnapshotHistory::new(config.history_depth),
            brush: config.initial_brush(),
            brush_range: config.brush_range(),
            state: EditorState::Idle,
            pending_restore: None,
            clear_prompt_open: false,
            revision: 0,
        }
    }

    /// Apply one action. Never fails; problems are logged and the action
    /// is dropped.
    pub fn dispatch(&mut self, action: EditorAction) {
        log::trace!("Dispatching {:?}", action);
        match action {
            EditorAction::PointerDown(cell) => {
                self.settle();
                self.take_snapshot();
                self.state = EditorState::Drawing {
                    stroke: Stroke::new(self.brush),
                };
                self.draw(cell);
            }
            EditorAction::PointerMove(cell) => {
                if self.state.is_drawing() {
                    self.settle();
                    self.draw(cell);
                }
            }
            EditorAction::PointerUp => {
                if let Some(stroke) = self.state.finish() {
                    log::debug!("Stroke finished after {} samples", stroke.cells().len());
                }
            }
            EditorAction::Click(cell) => {
                if !self.state.is_drawing() {
                    self.settle();
                    self.draw(cell);
                }
            }
            EditorAction::KeyCommand(KeyCommand::Undo) => self.undo(),
            EditorAction::KeyCommand(KeyCommand::Redo) => self.redo(),
            EditorAction::PaletteSelect(color) => self.set_color(color),
            EditorAction::BrushSize(size) => self.set_brush_size(size),
            EditorAction::ClearRequest => self.clear_prompt_open = true,
            EditorAction::ClearConfirm(confirmed) => {
                if std::mem::take(&mut self.clear_prompt_open) && confirmed {
                    self.clear();
                }
            }
        }
    }

    fn draw(&mut self, cell: CellPos) {
        self.brush.paint(&mut self.surface, cell);
        if let Some(stroke) = self.state.stroke_mut() {
            stroke.add_cell(cell);
        }
        self.revision += 1;
    }

    fn clear(&mut self) {
        self.settle();
        self.take_snapshot();
        self.surface.fill_all(BACKGROUND);
        self.revision += 1;
        log::debug!("Canvas cleared");
    }

    fn take_snapshot(&mut self) {
        if let Err(e) = self.history.snapshot(&self.surface) {
            log::error!("Could not record history: {}", e);
        }
    }

    pub fn undo(&mut self) {
        self.settle();
        match self.history.undo(&self.surface) {
            Ok(pending) => self.pending_restore = pending,
            Err(e) => log::error!("Undo failed: {}", e),
        }
    }

    pub fn redo(&mut self) {
        self.settle();
        match self.history.redo(&self.surface) {
            Ok(pending) => self.pending_restore = pending,
            Err(e) => log::error!("Redo failed: {}", e),
        }
    }

    /// Block until any in-flight restore has been committed
    pub fn settle(&mut self) {
        if let Some(pending) = self.pending_restore.take() {
            let result = pending.finish(&mut self.surface).map(|_| ());
            self.apply_restore(result);
        }
    }

    /// Commit an in-flight restore if its decode has finished, without
    /// blocking. Returns true if the surface changed.
    pub fn poll_restore(&mut self) -> bool {
        let Some(pending) = self.pending_restore.as_mut() else {
            return false;
        };
        let Some(decoded) = pending.poll_decoded() else {
            return false;
        };
        self.pending_restore = None;
        match decoded {
            Ok(pixels) => {
                self.surface.replace(pixels);
                self.apply_restore(Ok(()))
            }
            Err(e) => self.apply_restore(Err(e)),
        }
    }

    fn apply_restore(&mut self, result: Result<(), crate::error::SnapshotError>) -> bool {
        match result {
            Ok(()) => {
                self.revision += 1;
                true
            }
            Err(e) => {
                log::error!("Restore failed, keeping current canvas: {}", e);
                false
            }
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.color = color;
        if let Some(stroke) = self.state.stroke_mut() {
            stroke.set_color(color);
        }
    }

    /// Clamped into the configured range
    pub fn set_brush_size(&mut self, size: u32) {
        let size = size.clamp(*self.brush_range.start(), *self.brush_range.end());
        self.brush.size = size;
        if let Some(stroke) = self.state.stroke_mut() {
            stroke.set_size(size);
        }
    }

    /// Sample the (settled) surface into an export record
    pub fn export_record(&mut self, description: Option<&str>, character_name: Option<&str>) -> ExportRecord {
        self.settle();
        ExportRecord::from_surface(&self.surface, description, character_name)
    }

    /// Sample, encode and hand the file to `sink`
    pub fn export(
        &mut self,
        description: Option<&str>,
        character_name: Option<&str>,
        sink: &mut dyn ExportSink,
    ) -> Result<ExportRecord, ExportError> {
        self.settle();
        export_surface(&self.surface, description, character_name, sink)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn brush_range(&self) -> RangeInclusive<u32> {
        self.brush_range.clone()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    pub fn clear_prompt_open(&self) -> bool {
        self.clear_prompt_open
    }

    /// Kind of the restore still waiting to be committed, if any
    pub fn pending_restore(&self) -> Option<RestoreKind> {
        self.pending_restore.as_ref().map(PendingRestore::kind)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_snapshots_and_draws() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::PointerDown(CellPos::new(2, 3)));

        assert!(editor.is_drawing());
        assert_eq!(editor.history().undo_len(), 1);
        assert_eq!(editor.surface().cell_color(CellPos::new(2, 3)), Some(Color32::BLACK));
    }

    #[test]
    fn test_move_while_idle_does_nothing() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::PointerMove(CellPos::new(2, 3)));
        assert_eq!(editor.surface().cell_color(CellPos::new(2, 3)), Some(Color32::WHITE));
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_stroke_records_samples() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::PointerDown(CellPos::new(0, 0)));
        editor.dispatch(EditorAction::PointerMove(CellPos::new(1, 0)));
        editor.dispatch(EditorAction::PointerMove(CellPos::new(3, 0)));

        let stroke = editor.state().stroke().unwrap();
        assert_eq!(stroke.cells().len(), 3);
        assert_eq!(stroke.last_cell(), Some(CellPos::new(3, 0)));
        // Samples are not joined up
        assert_eq!(editor.surface().cell_color(CellPos::new(2, 0)), Some(Color32::WHITE));

        editor.dispatch(EditorAction::PointerUp);
        assert!(!editor.is_drawing());
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_click_while_idle_draws_without_snapshot() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::Click(CellPos::new(5, 5)));
        assert_eq!(editor.surface().cell_color(CellPos::new(5, 5)), Some(Color32::BLACK));
        assert_eq!(editor.history().undo_len(), 0);
    }

    #[test]
    fn test_palette_change_mid_stroke_applies_to_next_sample() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::PointerDown(CellPos::new(0, 0)));
        editor.dispatch(EditorAction::PaletteSelect(Color32::RED));
        editor.dispatch(EditorAction::PointerMove(CellPos::new(1, 0)));

        assert!(editor.is_drawing());
        assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::BLACK));
        assert_eq!(editor.surface().cell_color(CellPos::new(1, 0)), Some(Color32::RED));
        assert_eq!(editor.state().stroke().unwrap().brush().color, Color32::RED);
    }

    #[test]
    fn test_brush_size_is_clamped() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::BrushSize(99));
        assert_eq!(editor.brush().size, 10);
        editor.dispatch(EditorAction::BrushSize(0));
        assert_eq!(editor.brush().size, 1);
    }

    #[test]
    fn test_undo_is_pending_until_polled() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::PointerDown(CellPos::new(0, 0)));
        editor.dispatch(EditorAction::PointerUp);
        editor.dispatch(EditorAction::KeyCommand(KeyCommand::Undo));

        assert_eq!(editor.pending_restore(), Some(RestoreKind::Undo));
        assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::BLACK));

        assert!(editor.poll_restore());
        assert_eq!(editor.pending_restore(), None);
        assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::WHITE));
        assert!(!editor.poll_restore());
    }

    #[test]
    fn test_clear_needs_an_open_prompt() {
        let mut editor = Editor::default();
        editor.dispatch(EditorAction::Click(CellPos::new(0, 0)));
        editor.dispatch(EditorAction::ClearConfirm(true));
        assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::BLACK));
        assert_eq!(editor.history().undo_len(), 0);
    }
}
