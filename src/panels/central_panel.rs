use crate::PaintApp;
use crate::surface::SURFACE_SIZE;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Pixel Art");

        // One screen point per device pixel, so the 16px cell mapping holds
        let size = egui::vec2(SURFACE_SIZE as f32, SURFACE_SIZE as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

        app.handle_canvas(ctx, &painter, response.rect);

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });
}
