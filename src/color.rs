use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// CSS names accepted by [`parse_color`], as offered by the default palette
const NAMED_COLORS: &[(&str, Color32)] = &[
    ("black", Color32::from_rgb(0x00, 0x00, 0x00)),
    ("white", Color32::from_rgb(0xFF, 0xFF, 0xFF)),
    ("gray", Color32::from_rgb(0x80, 0x80, 0x80)),
    ("red", Color32::from_rgb(0xFF, 0x00, 0x00)),
    ("orange", Color32::from_rgb(0xFF, 0xA5, 0x00)),
    ("yellow", Color32::from_rgb(0xFF, 0xFF, 0x00)),
    ("green", Color32::from_rgb(0x00, 0x80, 0x00)),
    ("blue", Color32::from_rgb(0x00, 0x00, 0xFF)),
    ("purple", Color32::from_rgb(0x80, 0x00, 0x80)),
    ("brown", Color32::from_rgb(0xA5, 0x2A, 0x2A)),
    ("pink", Color32::from_rgb(0xFF, 0xC0, 0xCB)),
];

/// Background every fresh or cleared surface is filled with
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Formats the RGB channels as `#RRGGBB`, uppercase. Alpha is dropped.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Parses `#RRGGBB`, `#RGB` or one of the palette's CSS color names.
pub fn parse_color(text: &str) -> Result<Color32, ColorParseError> {
    let trimmed = text.trim();
    let err = || ColorParseError(text.to_owned());

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        return match hex.len() {
            6 => Ok(Color32::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #RGB expands each digit: #F80 == #FF8800
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
                Ok(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        };
    }

    let lower = trimmed.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
        .ok_or_else(err)
}

/// One swatch of the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    /// Anything [`parse_color`] accepts
    pub color: String,
}

impl PaletteEntry {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_owned(),
            color: color.to_owned(),
        }
    }

    /// Resolves the swatch, or `None` (with a warning) if the config holds garbage.
    pub fn resolve(&self) -> Option<Color32> {
        match parse_color(&self.color) {
            Ok(color) => Some(color),
            Err(e) => {
                log::warn!("Ignoring palette entry {}: {}", self.name, e);
                None
            }
        }
    }
}

pub fn default_palette() -> Vec<PaletteEntry> {
    NAMED_COLORS
        .iter()
        .map(|(name, _)| PaletteEntry::new(name, name))
        .collect()
}
