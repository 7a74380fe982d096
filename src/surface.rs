use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

/// Edge length of one cell in device pixels
pub const CELL_SIZE: u32 = 16;
/// Number of cells along each axis
pub const GRID_CELLS: u32 = 24;
/// Edge length of the whole surface in device pixels
pub const SURFACE_SIZE: u32 = CELL_SIZE * GRID_CELLS;

/// A cell coordinate. Signed because strokes may reach past the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Maps a pointer position to the cell under it, given where the
    /// surface's top-left corner is on screen. Positions left of or above
    /// the origin map to negative cells.
    pub fn from_screen(pos: Pos2, origin: Pos2) -> Self {
        let cell = CELL_SIZE as f32;
        Self {
            x: ((pos.x - origin.x) / cell).floor() as i32,
            y: ((pos.y - origin.y) / cell).floor() as i32,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_on_grid(self) -> bool {
        (0..GRID_CELLS as i32).contains(&self.x) && (0..GRID_CELLS as i32).contains(&self.y)
    }
}

/// The raster buffer backing the canvas.
///
/// Cells are painted as solid 16x16 blocks. Anything that falls outside the
/// buffer is clipped without complaint, the same way a 2D canvas context
/// drops an out-of-range `fillRect`.
#[derive(Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(crate::color::BACKGROUND)
    }
}

impl Surface {
    /// A fresh surface filled with `background`
    pub fn new(background: Color32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(SURFACE_SIZE, SURFACE_SIZE, to_rgba(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Fill one cell. Off-surface cells are clipped.
    pub fn fill_cell(&mut self, cell: CellPos, color: Color32) {
        self.fill_rect(
            i64::from(cell.x) * i64::from(CELL_SIZE),
            i64::from(cell.y) * i64::from(CELL_SIZE),
            CELL_SIZE,
            CELL_SIZE,
            color,
        );
    }

    /// Reset every pixel to `color`
    pub fn fill_all(&mut self, color: Color32) {
        let rgba = to_rgba(color);
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    fn fill_rect(&mut self, left: i64, top: i64, w: u32, h: u32, color: Color32) {
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + i64::from(w)).min(i64::from(self.width()));
        let y1 = (top + i64::from(h)).min(i64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let rgba = to_rgba(color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x as u32, y as u32, rgba);
            }
        }
    }

    /// Color of a single device pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
    }

    /// Color at a cell's top-left device pixel, `None` off the grid
    pub fn cell_color(&self, cell: CellPos) -> Option<Color32> {
        if !cell.is_on_grid() {
            return None;
        }
        self.pixel(cell.x as u32 * CELL_SIZE, cell.y as u32 * CELL_SIZE)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Replace the whole buffer. The caller guarantees matching dimensions.
    pub(crate) fn replace(&mut self, pixels: RgbaImage) {
        debug_assert_eq!(pixels.dimensions(), self.pixels.dimensions());
        self.pixels = pixels;
    }

    /// Copy into an egui image for texture upload
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}
