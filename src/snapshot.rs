use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

use crate::error::SnapshotError;
use crate::surface::Surface;

/// An immutable, PNG-encoded copy of the surface at one instant.
///
/// Cloning shares the encoded bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("png", &format!("<{} bytes>", self.png.len()))
            .finish()
    }
}

impl Snapshot {
    /// Encode the current surface contents
    pub fn capture(surface: &Surface) -> Result<Self, SnapshotError> {
        let mut bytes = Vec::new();
        surface
            .as_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SnapshotError::Encode)?;
        Ok(Self { png: bytes.into() })
    }

    /// Size of the encoded form
    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Decode back into a pixel buffer sized for `width` x `height`
    pub fn decode(&self, width: u32, height: u32) -> Result<RgbaImage, SnapshotError> {
        let pixels = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(SnapshotError::Decode)?
            .to_rgba8();
        if pixels.dimensions() != (width, height) {
            return Err(SnapshotError::SizeMismatch {
                expected_w: width,
                expected_h: height,
                found_w: pixels.width(),
                found_h: pixels.height(),
            });
        }
        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CellPos;
    use egui::Color32;

    #[test]
    fn test_capture_then_decode_preserves_pixels() {
        let mut surface = Surface::default();
        surface.fill_cell(CellPos::new(5, 7), Color32::from_rgb(12, 34, 56));

        let snapshot = Snapshot::capture(&surface).unwrap();
        let pixels = snapshot.decode(surface.width(), surface.height()).unwrap();
        assert_eq!(&pixels, surface.as_image());
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let snapshot = Snapshot::capture(&Surface::default()).unwrap();
        let err = snapshot.decode(10, 10).unwrap_err();
        assert!(matches!(err, SnapshotError::SizeMismatch { found_w: 384, .. }));
    }
}
