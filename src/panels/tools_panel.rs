use crate::PaintApp;
use crate::components::ColorSwatch;
use crate::input::{EditorAction, KeyCommand};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Palette");

            let active = app.editor().brush().color;
            let mut picked = None;
            ui.horizontal_wrapped(|ui| {
                for (name, color) in app.config().palette_colors() {
                    if ColorSwatch::new(&name, color, color == active).show(ui).clicked() {
                        picked = Some(color);
                    }
                }
            });
            if let Some(color) = picked {
                app.dispatch(EditorAction::PaletteSelect(color));
            }

            ui.separator();

            let mut size = app.editor().brush().size;
            let range = app.editor().brush_range();
            if ui.add(egui::Slider::new(&mut size, range).text("Brush size")).changed() {
                app.dispatch(EditorAction::BrushSize(size));
            }
            ui.checkbox(&mut app.renderer_mut().show_grid, "Show grid");

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let history = app.editor().history();
                let can_undo = history.can_undo();
                let can_redo = history.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).on_hover_text("Ctrl+Z").clicked() {
                    app.dispatch(EditorAction::KeyCommand(KeyCommand::Undo));
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).on_hover_text("Ctrl+X").clicked() {
                    app.dispatch(EditorAction::KeyCommand(KeyCommand::Redo));
                }
            });
            let history = app.editor().history();
            ui.label(format!(
                "Undo {}/{}, redo {}",
                history.undo_len(),
                history.depth(),
                history.redo_len()
            ));

            if ui.button("Clear canvas").clicked() {
                app.dispatch(EditorAction::ClearRequest);
            }

            ui.separator();
            ui.heading("Export");

            ui.label("Character name");
            ui.text_edit_singleline(&mut app.character_name);
            ui.label("Description");
            ui.text_edit_multiline(&mut app.description);

            if ui.button("Save").clicked() {
                app.export();
            }
        });
}
