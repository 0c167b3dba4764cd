#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::cmp::Ordering;

use crate::consts::DEFAULT_SCALE;

/// A point in either canvas or grid space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point expressed relative to `origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// An in-bounds cell of the tile grid.
///
/// Ordered row-major (by `y`, then `x`), matching the exported pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Ord for GridPos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for GridPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// View state: pan translation and zoom of the grid on the canvas.
///
/// `offset_x` / `offset_y` are in canvas pixels.
/// `scale` is canvas pixels per grid cell and must stay positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: DEFAULT_SCALE }
    }
}

impl Camera {
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    /// Convert a grid-space point to canvas coordinates.
    #[must_use]
    pub fn pixel_to_canvas(&self, pixel: Point) -> Point {
        Point {
            x: pixel.x * self.scale + self.offset_x,
            y: pixel.y * self.scale + self.offset_y,
        }
    }

    /// Convert a canvas point to (fractional) grid coordinates.
    #[must_use]
    pub fn canvas_to_pixel(&self, canvas: Point) -> Point {
        debug_assert!(self.scale > 0.0, "camera scale must be positive, got {}", self.scale);
        Point {
            x: (canvas.x - self.offset_x) / self.scale,
            y: (canvas.y - self.offset_y) / self.scale,
        }
    }

    /// The integer grid cell under a canvas point.
    ///
    /// Cell `c` covers `[edge(c), edge(c + 1))` where `edge` is the same
    /// formula [`Camera::pixel_to_canvas`] uses, so the answer always agrees
    /// with the rectangle the renderer fills. No bounds checking; the result
    /// may be negative or past the tile edge.
    #[must_use]
    pub fn canvas_to_grid(&self, canvas: Point) -> (i64, i64) {
        let pixel = self.canvas_to_pixel(canvas);
        (
            self.cell_along(pixel.x, canvas.x, self.offset_x),
            self.cell_along(pixel.y, canvas.y, self.offset_y),
        )
    }

    /// Floor `pixel`, then correct the division's rounding error by checking
    /// the neighboring cell edges in canvas space.
    #[allow(clippy::cast_possible_truncation)]
    fn cell_along(&self, pixel: f64, canvas: f64, offset: f64) -> i64 {
        let mut cell = pixel.floor();
        if (cell + 1.0) * self.scale + offset <= canvas {
            cell += 1.0;
        } else if cell * self.scale + offset > canvas {
            cell -= 1.0;
        }
        cell as i64
    }

    /// Translate the view by a canvas-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Set the scale, clamped to `[min, max]`. Non-finite requests are ignored.
    ///
    /// Returns the scale in effect afterwards.
    pub fn set_scale(&mut self, scale: f64, min: f64, max: f64) -> f64 {
        if scale.is_finite() {
            self.scale = scale.clamp(min, max);
        }
        self.scale
    }
}
