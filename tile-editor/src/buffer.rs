//! Paint buffer: the authoritative cell colors of one tile.
//!
//! Cells are stored sparsely, keyed by [`GridPos`], so an untouched tile costs
//! nothing and "unset" is simply absence. The grid edge is fixed when the
//! buffer is created. Every mutation validates its coordinate and color first,
//! so a rejected call leaves the buffer exactly as it was.
//!
//! The exported form is the dense row-major layout used by [`tiles::Tile`]:
//! index `x + y * size`, `None` for unset cells.

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::GridPos;
use crate::color::Color;
use crate::error::EditorError;

/// What happens when a painted cell is painted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    /// Last write wins.
    #[default]
    Overwrite,
    /// The first color sticks until the cell is cleared.
    Preserve,
}

/// Sparse `size × size` map from cell to color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintBuffer {
    size: u32,
    mode: PaintMode,
    cells: BTreeMap<GridPos, Color>,
}

impl PaintBuffer {
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self::with_mode(size, PaintMode::default())
    }

    #[must_use]
    pub fn with_mode(size: u32, mode: PaintMode) -> Self {
        Self { size, mode, cells: BTreeMap::new() }
    }

    /// Width and height of the grid in cells.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Number of painted cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at a signed grid coordinate, if it lies inside the tile.
    #[must_use]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<GridPos> {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return None;
        };
        (x < self.size && y < self.size).then_some(GridPos { x, y })
    }

    /// Paint a cell. Returns whether the visible state changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::OutOfRangeCoordinate`] if `(x, y)` is outside the tile.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<bool, EditorError> {
        let pos = self.checked(x, y)?;
        match (self.mode, self.cells.get(&pos)) {
            (_, Some(&existing)) if existing == color => Ok(false),
            (PaintMode::Preserve, Some(_)) => Ok(false),
            _ => {
                self.cells.insert(pos, color);
                Ok(true)
            }
        }
    }

    /// The color of a cell, or `None` when unset or outside the tile.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.cells.get(&GridPos { x, y }).copied()
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Unset a cell. Returns whether it was painted.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::OutOfRangeCoordinate`] if `(x, y)` is outside the tile.
    pub fn clear_pixel(&mut self, x: u32, y: u32) -> Result<bool, EditorError> {
        let pos = self.checked(x, y)?;
        Ok(self.cells.remove(&pos).is_some())
    }

    /// Unset every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Painted cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Color)> + '_ {
        self.cells.iter().map(|(&pos, &color)| (pos, color))
    }

    /// Dense array index of a cell: `x + y * size`.
    ///
    /// `pos` is expected to lie inside the tile.
    #[must_use]
    pub fn index_of(&self, pos: GridPos) -> usize {
        pos.x as usize + pos.y as usize * self.size as usize
    }

    /// Cell at a dense array index, if the index is inside the tile.
    #[must_use]
    pub fn pos_of(&self, index: usize) -> Option<GridPos> {
        let side = self.size as usize;
        let count = tiles::cell_count(self.size)?;
        if index >= count {
            return None;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(index % side), u32::try_from(index / side)) else {
            return None;
        };
        Some(GridPos { x, y })
    }

    /// Dense row-major pixel array, `size * size` long.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTile`] when `size * size` does not fit in
    /// `usize`.
    pub fn to_pixels(&self) -> Result<Vec<Option<u32>>, EditorError> {
        let mut pixels = vec![None; self.cell_count()?];
        for (pos, color) in self.iter() {
            let index = self.index_of(pos);
            if let Some(slot) = pixels.get_mut(index) {
                *slot = Some(color.rgb());
            }
        }
        Ok(pixels)
    }

    /// Replace every cell from a dense row-major pixel array.
    ///
    /// The array is validated in full before anything changes.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTile`] when the length is not `size * size`
    /// and [`EditorError::MalformedColor`] when any value exceeds 24 bits.
    pub fn load_pixels(&mut self, pixels: &[Option<u32>]) -> Result<(), EditorError> {
        let expected = self.cell_count()?;
        if pixels.len() != expected {
            return Err(tiles::TileError::PixelCountMismatch { size: self.size, expected, actual: pixels.len() }.into());
        }
        let mut cells = BTreeMap::new();
        for (index, pixel) in pixels.iter().enumerate() {
            let Some(rgb) = *pixel else {
                continue;
            };
            if let Some(pos) = self.pos_of(index) {
                cells.insert(pos, Color::new(rgb)?);
            }
        }
        self.cells = cells;
        Ok(())
    }

    fn cell_count(&self) -> Result<usize, EditorError> {
        tiles::cell_count(self.size).ok_or_else(|| tiles::TileError::TooLarge { size: self.size }.into())
    }

    fn checked(&self, x: u32, y: u32) -> Result<GridPos, EditorError> {
        if x < self.size && y < self.size {
            Ok(GridPos { x, y })
        } else {
            Err(EditorError::OutOfRangeCoordinate { x: i64::from(x), y: i64::from(y), size: self.size })
        }
    }
}
