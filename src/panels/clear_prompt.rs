use crate::PaintApp;
use crate::input::EditorAction;

/// Yes/no window shown while a clear is waiting for confirmation
pub fn clear_prompt(app: &mut PaintApp, ctx: &egui::Context) {
    if !app.editor().clear_prompt_open() {
        return;
    }

    let mut answer = None;
    egui::Window::new("Clear canvas")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Are you sure you want to clear the canvas? This action cannot be undone.");
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        answer = answer.or(Some(false));
    }
    if let Some(confirmed) = answer {
        app.dispatch(EditorAction::ClearConfirm(confirmed));
    }
}
