//! 24-bit colors and the source the editor reads its paint color from.
//!
//! The editor never holds a "current color" of its own. It asks an injected
//! [`ColorSource`] at paint time, so a picker widget can update the color
//! without going through the editor.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLOR, MAX_RGB};
use crate::error::EditorError;

/// A 24-bit RGB color (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Color(u32);

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR)
    }
}

impl Color {
    pub const BLACK: Color = Color(0x00_0000);
    pub const WHITE: Color = Color(MAX_RGB);

    /// Validate a raw integer as a 24-bit color.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedColor`] when `rgb` exceeds `0xFFFFFF`.
    pub fn new(rgb: u32) -> Result<Self, EditorError> {
        if rgb > MAX_RGB {
            return Err(EditorError::MalformedColor(format!("{rgb:#x} exceeds 0xffffff")));
        }
        Ok(Self(rgb))
    }

    /// Clamp a raw integer into the 24-bit range.
    #[must_use]
    pub fn clamped(rgb: u32) -> Self {
        Self(rgb.min(MAX_RGB))
    }

    #[must_use]
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// The raw `0xRRGGBB` value.
    #[must_use]
    pub fn rgb(self) -> u32 {
        self.0
    }

    /// CSS hex notation, always six zero-padded digits (`#0000ff`).
    #[must_use]
    pub fn to_css_hex(self) -> String {
        format!("#{:06x}", self.0)
    }

    /// Parse `#rrggbb` or `rrggbb`, as emitted by color inputs.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedColor`] for anything else.
    pub fn parse_hex(text: &str) -> Result<Self, EditorError> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EditorError::MalformedColor(format!("{text:?} is not #rrggbb")));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|err| EditorError::MalformedColor(format!("{text:?}: {err}")))
    }
}

impl TryFrom<u32> for Color {
    type Error = EditorError;

    fn try_from(rgb: u32) -> Result<Self, Self::Error> {
        Self::new(rgb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl FromStr for Color {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Supplies the color to paint with. Read once per paint.
pub trait ColorSource {
    fn current(&self) -> Color;
}

/// A fixed color is its own source.
impl ColorSource for Color {
    fn current(&self) -> Color {
        *self
    }
}

/// A color shared between a picker and one or more editors.
///
/// Clones share the same cell; a `set` through any clone is seen by all.
#[derive(Debug, Clone, Default)]
pub struct SharedColor(Rc<Cell<Color>>);

impl SharedColor {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self(Rc::new(Cell::new(color)))
    }

    #[must_use]
    pub fn get(&self) -> Color {
        self.0.get()
    }

    pub fn set(&self, color: Color) {
        self.0.set(color);
    }

    /// Update from a picker's hex string. The stored color is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedColor`] if `text` is not `#rrggbb`.
    pub fn set_hex(&self, text: &str) -> Result<Color, EditorError> {
        let color = Color::parse_hex(text)?;
        self.set(color);
        Ok(color)
    }
}

impl ColorSource for SharedColor {
    fn current(&self) -> Color {
        self.get()
    }
}
