use std::collections::VecDeque;

use futures::FutureExt;
use futures::future::BoxFuture;
use image::RgbaImage;

use crate::error::SnapshotError;
use crate::snapshot::Snapshot;
use crate::surface::Surface;

/// How many undo steps are kept unless configured otherwise
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Which stack a restore was popped from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreKind {
    Undo,
    Redo,
}

/// A restore that has been popped from the history but not yet applied.
///
/// Restoring happens in three steps: the snapshot is popped synchronously by
/// [`SnapshotHistory::undo`] / [`SnapshotHistory::redo`], decoded by the
/// future held here, and finally committed onto the surface by the caller.
/// Until the commit the surface keeps its pre-restore pixels.
pub struct PendingRestore {
    kind: RestoreKind,
    decode: BoxFuture<'static, Result<RgbaImage, SnapshotError>>,
}

impl std::fmt::Debug for PendingRestore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRestore")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl PendingRestore {
    fn new(kind: RestoreKind, snapshot: Snapshot, width: u32, height: u32) -> Self {
        Self {
            kind,
            decode: async move { snapshot.decode(width, height) }.boxed(),
        }
    }

    pub fn kind(&self) -> RestoreKind {
        self.kind
    }

    /// Polls the decode once without blocking.
    ///
    /// Returns `Some` exactly once; the handle must be dropped afterwards.
    pub fn poll_decoded(&mut self) -> Option<Result<RgbaImage, SnapshotError>> {
        (&mut self.decode).now_or_never()
    }

    /// Await the decoded pixels
    pub async fn decoded(self) -> Result<RgbaImage, SnapshotError> {
        self.decode.await
    }

    /// Block until decoded, then write the pixels onto `surface`
    pub fn finish(self, surface: &mut Surface) -> Result<RestoreKind, SnapshotError> {
        let kind = self.kind;
        let pixels = futures::executor::block_on(self.decoded())?;
        surface.replace(pixels);
        Ok(kind)
    }
}

/// Undo/redo history made of full-surface snapshots.
///
/// The undo stack is capped at `depth` entries, dropping the oldest. The redo
/// stack is unbounded and is discarded whenever a new snapshot is taken.
#[derive(Debug)]
pub struct SnapshotHistory {
    /// Snapshots that can be restored by undo, oldest first
    undo_stack: VecDeque<Snapshot>,
    /// Snapshots that can be restored by redo, oldest first
    redo_stack: Vec<Snapshot>,
    depth: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SnapshotHistory {
    /// Creates an empty history keeping at most `depth` undo steps (at least one)
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(depth + 1),
            redo_stack: Vec::new(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record the surface before a mutating action.
    ///
    /// The redo stack is cleared even if encoding fails.
    pub fn snapshot(&mut self, surface: &Surface) -> Result<(), SnapshotError> {
        self.redo_stack.clear();
        let snapshot = Snapshot::capture(surface)?;
        let size = snapshot.len();
        self.push_undo(snapshot);
        log::debug!("Snapshot taken ({} bytes), undo depth {}", size, self.undo_stack.len());
        Ok(())
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.depth {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one snapshot. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, surface: &Surface) -> Result<Option<PendingRestore>, SnapshotError> {
        let Some(previous) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        let current = match Snapshot::capture(surface) {
            Ok(current) => current,
            Err(e) => {
                self.undo_stack.push_back(previous);
                return Err(e);
            }
        };
        self.redo_stack.push(current);
        log::debug!(
            "Undo: {} undo / {} redo remaining",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(Some(PendingRestore::new(
            RestoreKind::Undo,
            previous,
            surface.width(),
            surface.height(),
        )))
    }

    /// Step forward one snapshot. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, surface: &Surface) -> Result<Option<PendingRestore>, SnapshotError> {
        let Some(next) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let current = match Snapshot::capture(surface) {
            Ok(current) => current,
            Err(e) => {
                self.redo_stack.push(next);
                return Err(e);
            }
        };
        self.push_undo(current);
        log::debug!(
            "Redo: {} undo / {} redo remaining",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(Some(PendingRestore::new(
            RestoreKind::Redo,
            next,
            surface.width(),
            surface.height(),
        )))
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CellPos;
    use egui::Color32;

    fn painted(cell: CellPos, color: Color32) -> Surface {
        let mut surface = Surface::default();
        surface.fill_cell(cell, color);
        surface
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = SnapshotHistory::default();
        let surface = Surface::default();
        assert!(history.undo(&surface).unwrap().is_none());
        assert!(history.redo(&surface).unwrap().is_none());
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_undo_depth_is_capped() {
        let mut history = SnapshotHistory::default();
        let mut surface = Surface::default();
        for i in 0..11 {
            surface.fill_cell(CellPos::new(i, 0), Color32::BLACK);
            history.snapshot(&surface).unwrap();
        }
        assert_eq!(history.undo_len(), DEFAULT_HISTORY_DEPTH);

        // The oldest surviving snapshot is the second one taken: cells 0 and 1 black
        let mut oldest = None;
        while let Some(pending) = history.undo(&surface).unwrap() {
            pending.finish(&mut surface).unwrap();
            oldest = Some(surface.clone());
        }
        let oldest = oldest.unwrap();
        assert_eq!(oldest.cell_color(CellPos::new(1, 0)), Some(Color32::BLACK));
        assert_eq!(oldest.cell_color(CellPos::new(2, 0)), Some(Color32::WHITE));
    }

    #[test]
    fn test_snapshot_clears_redo() {
        let mut history = SnapshotHistory::default();
        let mut surface = Surface::default();
        history.snapshot(&surface).unwrap();
        surface.fill_cell(CellPos::new(0, 0), Color32::RED);

        history.undo(&surface).unwrap().unwrap().finish(&mut surface).unwrap();
        assert!(history.can_redo());

        history.snapshot(&surface).unwrap();
        assert!(!history.can_redo());
    }

    #[test]
    fn test_restore_is_deferred_until_commit() {
        let mut history = SnapshotHistory::default();
        let mut surface = Surface::default();
        history.snapshot(&surface).unwrap();
        surface.fill_cell(CellPos::new(3, 3), Color32::BLUE);

        let mut pending = history.undo(&surface).unwrap().unwrap();
        assert_eq!(pending.kind(), RestoreKind::Undo);
        // Popped already, surface untouched
        assert_eq!(history.undo_len(), 0);
        assert_eq!(surface.cell_color(CellPos::new(3, 3)), Some(Color32::BLUE));

        let pixels = pending.poll_decoded().unwrap().unwrap();
        surface.replace(pixels);
        assert_eq!(surface.cell_color(CellPos::new(3, 3)), Some(Color32::WHITE));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = SnapshotHistory::default();
        let mut surface = Surface::default();
        history.snapshot(&surface).unwrap();
        surface = painted(CellPos::new(4, 4), Color32::GREEN);
        let before_undo = surface.clone();

        history.undo(&surface).unwrap().unwrap().finish(&mut surface).unwrap();
        assert!(surface != before_undo);

        let kind = history.redo(&surface).unwrap().unwrap().finish(&mut surface).unwrap();
        assert_eq!(kind, RestoreKind::Redo);
        assert!(surface == before_undo);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_clear_forgets_both_stacks() {
        let mut history = SnapshotHistory::default();
        let surface = Surface::default();
        history.snapshot(&surface).unwrap();
        history.snapshot(&surface).unwrap();
        drop(history.undo(&surface).unwrap());
        assert!(history.can_undo() && history.can_redo());

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo_moves_one_entry_each_way() {
        let mut history = SnapshotHistory::default();
        let surface = Surface::default();
        history.snapshot(&surface).unwrap();
        history.snapshot(&surface).unwrap();

        assert!(history.undo(&surface).unwrap().is_some());
        assert_eq!((history.undo_len(), history.redo_len()), (1, 1));
        assert!(history.redo(&surface).unwrap().is_some());
        assert_eq!((history.undo_len(), history.redo_len()), (2, 0));
        assert!(history.redo(&surface).unwrap().is_none());
        assert_eq!((history.undo_len(), history.redo_len()), (2, 0));
    }

    #[test]
    fn test_depth_of_zero_keeps_one() {
        let history = SnapshotHistory::new(0);
        assert_eq!(history.depth(), 1);
    }
}
