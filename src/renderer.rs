use egui::{Color32, Painter, Rect, TextureHandle, TextureOptions, pos2};

use crate::editor::Editor;
use crate::surface::GRID_CELLS;

/// Draws the editor surface as a texture, re-uploading only when the
/// surface revision changes.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    /// Faint lines between cells
    pub show_grid: bool,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("uploaded_revision", &self.uploaded_revision)
            .field("show_grid", &self.show_grid)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_texture(&mut self, ctx: &egui::Context, editor: &Editor) -> &TextureHandle {
        let revision = editor.revision();
        let stale = self.uploaded_revision != Some(revision);
        let texture = match self.texture.take() {
            Some(mut texture) => {
                if stale {
                    texture.set(editor.surface().to_color_image(), TextureOptions::NEAREST);
                }
                texture
            }
            None => ctx.load_texture(
                "pixel-surface",
                editor.surface().to_color_image(),
                TextureOptions::NEAREST,
            ),
        };
        if stale {
            log::trace!("Uploaded surface revision {}", revision);
        }
        self.uploaded_revision = Some(revision);
        self.texture.insert(texture)
    }

    /// Paint the surface into `rect`, which should be the surface's own size
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect, editor: &Editor) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let texture_id = self.sync_texture(ctx, editor).id();
        painter.image(texture_id, rect, uv, Color32::WHITE);

        if self.show_grid {
            let line = egui::Stroke::new(1.0, Color32::from_black_alpha(24));
            let step = rect.width() / GRID_CELLS as f32;
            for i in 1..GRID_CELLS {
                let offset = i as f32 * step;
                painter.line_segment(
                    [pos2(rect.min.x + offset, rect.min.y), pos2(rect.min.x + offset, rect.max.y)],
                    line,
                );
                painter.line_segment(
                    [pos2(rect.min.x, rect.min.y + offset), pos2(rect.max.x, rect.min.y + offset)],
                    line,
                );
            }
        }
    }
}
