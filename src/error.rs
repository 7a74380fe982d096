use thiserror::Error;

/// Errors raised while capturing or restoring a surface snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Snapshot is {found_w}x{found_h}, surface is {expected_w}x{expected_h}")]
    SizeMismatch {
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },
}

/// Errors that can occur while producing or delivering the export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize export record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write export file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// A color string that is neither a known name nor `#RGB` / `#RRGGBB`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid color: {0:?}")]
pub struct ColorParseError(pub String);
