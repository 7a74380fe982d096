use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::export::ExportSink;
use crate::input::{EditorAction, InputHandler};
use crate::panels::{central_panel, clear_prompt, tools_panel};
use crate::renderer::Renderer;

/// We derive Deserialize/Serialize so the settings survive a restart.
/// The canvas itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    config: EditorConfig,
    #[serde(skip)]
    editor: Editor,
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    pub(crate) description: String,
    #[serde(skip)]
    pub(crate) character_name: String,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintApp>(storage, eframe::APP_KEY))
            .map(|restored| restored.config)
            .unwrap_or_default();
        log::info!("Starting editor, history depth {}", config.history_depth);
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(&config),
            config,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            description: String::new(),
            character_name: String::new(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn dispatch(&mut self, action: EditorAction) {
        self.editor.dispatch(action);
    }

    /// Route this frame's canvas input, then draw the surface into `rect`
    pub(crate) fn handle_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        // The clear prompt is modal: only a release gets through while it is open
        let modal = self.editor.clear_prompt_open();
        for action in self.input.process_input(ctx, rect) {
            if modal && action != EditorAction::PointerUp {
                continue;
            }
            self.editor.dispatch(action);
        }
        self.renderer.render(ctx, painter, rect, &self.editor);
    }

    fn export_sink(&self) -> Box<dyn ExportSink> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Box::new(crate::export::DirectorySink::new(self.config.export_dir.clone()))
        }
        #[cfg(target_arch = "wasm32")]
        {
            Box::new(crate::export::BrowserDownload)
        }
    }

    /// Write `pixel-art.json`. Failures are logged only.
    pub fn export(&mut self) {
        let mut sink = self.export_sink();
        let description = self.description.clone();
        let character_name = self.character_name.clone();
        if let Err(e) = self.editor.export(Some(&description), Some(&character_name), sink.as_mut()) {
            log::error!("Export failed: {}", e);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.editor.poll_restore();
        if self.editor.pending_restore().is_some() {
            ctx.request_repaint();
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
        clear_prompt(self, ctx);
    }
}
