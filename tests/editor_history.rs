use egui::Color32;
use pixel_art_editor::brush::BRUSH_SIZE_LIMIT;
use pixel_art_editor::{CellPos, Editor, EditorAction, EditorConfig, KeyCommand, RestoreKind};

fn stroke_at(editor: &mut Editor, cell: CellPos) {
    editor.dispatch(EditorAction::PointerDown(cell));
    editor.dispatch(EditorAction::PointerUp);
}

fn undo(editor: &mut Editor) {
    editor.dispatch(EditorAction::KeyCommand(KeyCommand::Undo));
}

fn redo(editor: &mut Editor) {
    editor.dispatch(EditorAction::KeyCommand(KeyCommand::Redo));
}

#[test]
fn test_undo_stack_caps_at_ten() {
    let mut editor = Editor::default();
    for x in 0..11 {
        stroke_at(&mut editor, CellPos::new(x, 0));
    }
    assert_eq!(editor.history().undo_len(), 10);

    // Ten undos reach the state before the second stroke; the first stroke is permanent
    for _ in 0..15 {
        undo(&mut editor);
    }
    editor.settle();
    assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::BLACK));
    assert_eq!(editor.surface().cell_color(CellPos::new(1, 0)), Some(Color32::WHITE));
    assert_eq!(editor.history().redo_len(), 10);
}

#[test]
fn test_new_stroke_discards_redo() {
    let mut editor = Editor::default();
    stroke_at(&mut editor, CellPos::new(0, 0));
    stroke_at(&mut editor, CellPos::new(1, 0));
    undo(&mut editor);
    undo(&mut editor);
    editor.settle();
    assert_eq!(editor.history().redo_len(), 2);

    stroke_at(&mut editor, CellPos::new(5, 5));
    assert_eq!(editor.history().redo_len(), 0);

    redo(&mut editor);
    assert_eq!(editor.pending_restore(), None);
}

#[test]
fn test_undo_then_redo_round_trips() {
    let mut editor = Editor::default();
    editor.dispatch(EditorAction::PaletteSelect(Color32::from_rgb(10, 20, 30)));
    editor.dispatch(EditorAction::BrushSize(5));
    stroke_at(&mut editor, CellPos::new(12, 12));
    let before_undo = editor.surface().clone();

    undo(&mut editor);
    editor.settle();
    assert!(*editor.surface() != before_undo);

    redo(&mut editor);
    editor.settle();
    assert!(*editor.surface() == before_undo);
}

#[test]
fn test_back_to_back_undos_do_not_race() {
    let mut editor = Editor::default();
    stroke_at(&mut editor, CellPos::new(0, 0));
    stroke_at(&mut editor, CellPos::new(1, 0));

    // Second undo arrives before the first restore has been polled
    undo(&mut editor);
    assert_eq!(editor.pending_restore(), Some(RestoreKind::Undo));
    undo(&mut editor);
    editor.settle();

    assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::WHITE));
    assert_eq!(editor.surface().cell_color(CellPos::new(1, 0)), Some(Color32::WHITE));

    // Redo must bring back exactly one stroke at a time
    redo(&mut editor);
    editor.settle();
    assert_eq!(editor.surface().cell_color(CellPos::new(0, 0)), Some(Color32::BLACK));
    assert_eq!(editor.surface().cell_color(CellPos::new(1, 0)), Some(Color32::WHITE));
}

#[test]
fn test_undo_on_empty_history_is_silent() {
    let mut editor = Editor::default();
    undo(&mut editor);
    redo(&mut editor);
    assert_eq!(editor.pending_restore(), None);
    assert_eq!(editor.revision(), 0);
}

#[test]
fn test_clear_without_confirmation_keeps_canvas() {
    let mut editor = Editor::default();
    stroke_at(&mut editor, CellPos::new(3, 3));

    editor.dispatch(EditorAction::ClearRequest);
    assert!(editor.clear_prompt_open());
    editor.dispatch(EditorAction::ClearConfirm(false));

    assert!(!editor.clear_prompt_open());
    assert_eq!(editor.surface().cell_color(CellPos::new(3, 3)), Some(Color32::BLACK));
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn test_confirmed_clear_whitens_and_snapshots_once() {
    let mut editor = Editor::default();
    stroke_at(&mut editor, CellPos::new(3, 3));
    undo(&mut editor);
    redo(&mut editor);
    editor.settle();
    assert_eq!(editor.history().undo_len(), 1);

    editor.dispatch(EditorAction::ClearRequest);
    editor.dispatch(EditorAction::ClearConfirm(true));

    assert_eq!(editor.history().undo_len(), 2);
    assert_eq!(editor.history().redo_len(), 0);
    for y in 0..24 {
        for x in 0..24 {
            assert_eq!(editor.surface().cell_color(CellPos::new(x, y)), Some(Color32::WHITE));
        }
    }

    // And the clear itself can be undone
    undo(&mut editor);
    editor.settle();
    assert_eq!(editor.surface().cell_color(CellPos::new(3, 3)), Some(Color32::BLACK));
}

#[test]
fn test_release_ends_drawing() {
    let mut editor = Editor::default();
    editor.dispatch(EditorAction::PointerDown(CellPos::new(0, 0)));
    editor.dispatch(EditorAction::PointerUp);
    editor.dispatch(EditorAction::PointerMove(CellPos::new(9, 9)));
    assert!(!editor.is_drawing());
    assert_eq!(editor.surface().cell_color(CellPos::new(9, 9)), Some(Color32::WHITE));
}

#[test]
fn test_oversized_stored_brush_range_floods_without_panicking() {
    let config = EditorConfig {
        max_brush_size: 100_000,
        ..Default::default()
    };
    let mut editor = Editor::new(&config);
    editor.dispatch(EditorAction::BrushSize(100_000));
    assert_eq!(editor.brush().size, BRUSH_SIZE_LIMIT);

    stroke_at(&mut editor, CellPos::new(0, 0));
    assert_eq!(editor.surface().cell_color(CellPos::new(23, 23)), Some(Color32::BLACK));
}
