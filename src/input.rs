use egui::{Color32, Context, Event, Key, Modifiers, Pos2, Rect};

use crate::surface::CellPos;

/// History shortcuts recognized on the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Ctrl+Z
    Undo,
    /// Ctrl+X
    Redo,
}

impl KeyCommand {
    /// Map a key press to a shortcut. Only the Ctrl modifier counts; Cmd on
    /// macOS does not.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.ctrl || modifiers.alt || modifiers.shift {
            return None;
        }
        match key {
            Key::Z => Some(Self::Undo),
            Key::X => Some(Self::Redo),
            _ => None,
        }
    }

    /// Map a raw egui event. Integrations report Ctrl+X as [`Event::Cut`]
    /// instead of a key press, so that is accepted too.
    pub fn from_event(event: &Event, modifiers: Modifiers) -> Option<Self> {
        match event {
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Self::from_key(*key, *modifiers),
            Event::Cut => Self::from_key(Key::X, modifiers),
            _ => None,
        }
    }
}

/// Everything the editor reacts to, independent of the UI toolkit
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Pointer or touch pressed over the canvas
    PointerDown(CellPos),
    /// Pointer or touch moved over the canvas
    PointerMove(CellPos),
    /// Pointer or touch released, anywhere
    PointerUp,
    /// Press and release on the canvas without a drag
    Click(CellPos),
    KeyCommand(KeyCommand),
    PaletteSelect(Color32),
    BrushSize(u32),
    /// Ask for confirmation before wiping the canvas
    ClearRequest,
    /// Answer to the pending clear confirmation
    ClearConfirm(bool),
}

/// Pointer state for one frame, pulled out of egui so the translation can be
/// driven without a running context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Where the pointer is, if it is over the window
    pub pos: Option<Pos2>,
    /// Primary button went down this frame
    pub pressed: bool,
    /// Primary button is held
    pub down: bool,
    /// Primary button went up this frame
    pub released: bool,
    /// Press and release without dragging
    pub clicked: bool,
}

impl PointerSample {
    pub fn from_input(input: &egui::InputState) -> Self {
        let pointer = &input.pointer;
        Self {
            pos: pointer.interact_pos().or_else(|| pointer.hover_pos()),
            pressed: pointer.primary_pressed(),
            down: pointer.primary_down(),
            released: pointer.primary_released(),
            clicked: pointer.primary_clicked(),
        }
    }
}

/// Turns raw egui input into [`EditorAction`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer actions for one frame.
    ///
    /// Press, move and click only count over `canvas_rect`; a release is
    /// reported wherever it happens so a drag that leaves the canvas cannot
    /// leave the editor stuck drawing.
    pub fn pointer_actions(&mut self, sample: PointerSample, canvas_rect: Rect) -> Vec<EditorAction> {
        let mut actions = Vec::new();
        let over_canvas = sample.pos.filter(|pos| canvas_rect.contains(*pos));
        let to_cell = |pos: Pos2| CellPos::from_screen(pos, canvas_rect.min);

        if sample.pressed {
            if let Some(pos) = over_canvas {
                actions.push(EditorAction::PointerDown(to_cell(pos)));
            }
        } else if sample.down && sample.pos != self.last_pointer_pos {
            if let Some(pos) = over_canvas {
                actions.push(EditorAction::PointerMove(to_cell(pos)));
            }
        }

        if sample.released {
            actions.push(EditorAction::PointerUp);
            if sample.clicked {
                if let Some(pos) = over_canvas {
                    actions.push(EditorAction::Click(to_cell(pos)));
                }
            }
        }

        self.last_pointer_pos = sample.pos;
        actions
    }

    /// Collect this frame's actions from `ctx`, consuming the history
    /// shortcuts so nothing else (such as a cut) handles them as well.
    ///
    /// Shortcuts are left alone while a text field has focus.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<EditorAction> {
        let sample = ctx.input(PointerSample::from_input);
        let mut actions = self.pointer_actions(sample, canvas_rect);

        if !ctx.wants_keyboard_input() {
            // One action per press, in event order
            let commands = ctx.input_mut(|input| {
                let modifiers = input.modifiers;
                let mut commands = Vec::new();
                input.events.retain(|event| match KeyCommand::from_event(event, modifiers) {
                    Some(command) => {
                        commands.push(command);
                        false
                    }
                    None => true,
                });
                commands
            });
            actions.extend(commands.into_iter().map(EditorAction::KeyCommand));
        }

        actions
    }
}
