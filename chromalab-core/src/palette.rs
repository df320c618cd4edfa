//! Swatch palette: a bounded, most-recent-first list of hex colors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::hex::parse_hex;

/// Maximum number of swatches kept; older entries fall off the tail.
pub const MAX_PALETTE_LEN: usize = 60;

/// Swatches seeded at startup: grays, a hue wheel, then the dark web colors.
pub const DEFAULT_PALETTE: [&str; 19] = [
    "#000000", "#444444", "#888888", "#CCCCCC", "#FFFFFF", "#FF0000", "#FF7F00", "#FFFF00",
    "#00FF00", "#00FFFF", "#0000FF", "#7F00FF", "#FF00FF", "#800000", "#808000", "#008000",
    "#008080", "#000080", "#800080",
];

/// What [`Palette::add_color`] did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Blank input; nothing to do.
    Empty,
    /// Already present (case-insensitive); palette unchanged.
    Duplicate,
    /// Inserted at the front.
    Inserted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    entries: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Palette {
    /// An empty palette.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a user-typed hex color at the front.
    ///
    /// The input is trimmed and given a leading `#` if missing. Invalid hex
    /// leaves the palette untouched and returns the parse error.
    pub fn add_color(&mut self, input: &str) -> crate::Result<AddOutcome> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(AddOutcome::Empty);
        }
        let hex = if trimmed.starts_with('#') {
            trimmed.to_string()
        } else {
            format!("#{trimmed}")
        };
        parse_hex(&hex)?;

        if self.contains(&hex) {
            debug!("Palette already contains {hex}");
            return Ok(AddOutcome::Duplicate);
        }

        self.entries.insert(0, hex);
        self.entries.truncate(MAX_PALETTE_LEN);
        debug!("Palette now has {} entries", self.entries.len());
        Ok(AddOutcome::Inserted)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, hex: &str) -> bool {
        self.entries.iter().any(|e| e.eq_ignore_ascii_case(hex))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Entries paired with their parsed color, for drawing swatches.
    /// Entries are validated on insert, so none are skipped in practice.
    pub fn swatches(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries
            .iter()
            .filter_map(|e| parse_hex(e).ok().map(|rgb| (e.as_str(), rgb)))
    }
}
