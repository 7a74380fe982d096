use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::color::to_hex;
use crate::error::ExportError;
use crate::surface::{CELL_SIZE, GRID_CELLS, Surface};

pub const EXPORT_FILE_NAME: &str = "pixel-art.json";
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// What gets written out: every cell's color plus the user's metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// `#RRGGBB` per cell, row-major from the top-left
    pub pixel_data: Vec<String>,
    pub description: String,
    pub character_name: String,
}

impl ExportRecord {
    /// Missing text fields become empty strings
    pub fn from_surface(surface: &Surface, description: Option<&str>, character_name: Option<&str>) -> Self {
        Self {
            pixel_data: sample_cells(surface),
            description: description.unwrap_or_default().to_owned(),
            character_name: character_name.unwrap_or_default().to_owned(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// JSON, then base64 (standard alphabet, padded)
    pub fn encode(&self) -> Result<String, ExportError> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    pub fn to_file(&self) -> Result<ExportFile, ExportError> {
        Ok(ExportFile {
            name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME_TYPE,
            body: self.encode()?,
        })
    }
}

/// Sample each cell at its top-left device pixel
pub fn sample_cells(surface: &Surface) -> Vec<String> {
    let mut cells = Vec::with_capacity((GRID_CELLS * GRID_CELLS) as usize);
    for y in 0..GRID_CELLS {
        for x in 0..GRID_CELLS {
            let color = surface
                .pixel(x * CELL_SIZE, y * CELL_SIZE)
                .unwrap_or(crate::color::BACKGROUND);
            cells.push(to_hex(color));
        }
    }
    cells
}

/// A finished export, ready to hand to a sink
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: &'static str,
    pub mime: &'static str,
    pub body: String,
}

/// Somewhere an export file can be delivered
pub trait ExportSink {
    fn deliver(&mut self, file: &ExportFile) -> Result<(), ExportError>;
}

/// Writes the export into a directory (native builds)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file: &ExportFile) -> std::path::PathBuf {
        self.dir.join(file.name)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(file);
        std::fs::write(&path, &file.body)?;
        log::info!("Exported {} ({} bytes)", path.display(), file.body.len());
        Ok(())
    }
}

/// Triggers a browser download through a temporary anchor element
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl ExportSink for BrowserDownload {
    fn deliver(&mut self, file: &ExportFile) -> Result<(), ExportError> {
        use eframe::wasm_bindgen::JsCast as _;

        let fail = |what: &str| ExportError::Browser(what.to_owned());
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| fail("no document"))?;
        let anchor = document
            .create_element("a")
            .map_err(|_| fail("cannot create anchor"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| fail("element is not an anchor"))?;
        // The base64 body only uses characters that are legal in a data URL as is
        anchor.set_href(&format!("data:{},{}", file.mime, file.body));
        anchor.set_download(file.name);
        anchor.click();
        log::info!("Downloaded {} ({} bytes)", file.name, file.body.len());
        Ok(())
    }
}

/// Sample, serialize and deliver in one go
pub fn export_surface(
    surface: &Surface,
    description: Option<&str>,
    character_name: Option<&str>,
    sink: &mut dyn ExportSink,
) -> Result<ExportRecord, ExportError> {
    let record = ExportRecord::from_surface(surface, description, character_name);
    sink.deliver(&record.to_file()?)?;
    Ok(record)
}
