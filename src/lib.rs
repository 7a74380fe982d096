#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod color;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod snapshot;
pub mod state;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use brush::Brush;
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{ColorParseError, ExportError, SnapshotError};
pub use export::{ExportFile, ExportRecord, ExportSink};
pub use history::{PendingRestore, RestoreKind, SnapshotHistory};
pub use input::{EditorAction, InputHandler, KeyCommand};
pub use renderer::Renderer;
pub use snapshot::Snapshot;
pub use state::EditorState;
pub use stroke::Stroke;
pub use surface::{CellPos, Surface};
