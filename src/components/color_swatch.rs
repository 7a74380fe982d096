use egui::Color32;

/// A clickable square of one palette color
pub struct ColorSwatch<'a> {
    pub name: &'a str,
    pub color: Color32,
    pub selected: bool,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(name: &'a str, color: Color32, selected: bool) -> Self {
        Self {
            name,
            color,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let swatch_size = egui::vec2(24.0, 24.0);
        let (rect, response) = ui.allocate_exact_size(swatch_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 3.0, self.color);

            let border = if self.selected {
                egui::Stroke::new(2.0, Color32::from_rgb(33, 150, 243))
            } else if response.hovered() {
                egui::Stroke::new(1.0, Color32::from_gray(160))
            } else {
                egui::Stroke::new(1.0, Color32::from_gray(60))
            };
            ui.painter().rect_stroke(rect, 3.0, border);
        }

        response.on_hover_text(self.name)
    }
}
