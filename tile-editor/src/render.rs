//! Rendering: draws the full tile scene onto a 2D surface.
//!
//! This module only reads state. It receives the paint buffer and camera and
//! produces a complete frame: clear, painted cells, then the grid on top.
//! There is no dirty tracking; every call redraws everything.
//!
//! Drawing goes through [`Surface`], the handful of 2D-context verbs the
//! editor needs. [`web_sys::CanvasRenderingContext2d`] implements it for the
//! browser; tests use a recording double.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use web_sys::CanvasRenderingContext2d;

use crate::buffer::PaintBuffer;
use crate::camera::{Camera, Point};
use crate::color::Color;

/// The drawing verbs the renderer uses.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Set the fill color as a CSS color string.
    fn set_fill_color(&mut self, css: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

impl Surface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn set_fill_color(&mut self, css: &str) {
        CanvasRenderingContext2d::set_fill_style_str(self, css);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

/// Draw the full scene: clear, cells, grid.
///
/// `viewport_w` and `viewport_h` are the surface size in canvas pixels.
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    buffer: &PaintBuffer,
    camera: &Camera,
    viewport_w: f64,
    viewport_h: f64,
) {
    surface.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    draw_cells(surface, buffer, camera);
    draw_grid(surface, buffer.size(), camera);
}

// =============================================================
// Cells
// =============================================================

fn draw_cells<S: Surface + ?Sized>(surface: &mut S, buffer: &PaintBuffer, camera: &Camera) {
    let mut fill: Option<Color> = None;
    for (pos, color) in buffer.iter() {
        if fill != Some(color) {
            surface.set_fill_color(&color.to_css_hex());
            fill = Some(color);
        }
        let corner = camera.pixel_to_canvas(Point::new(f64::from(pos.x), f64::from(pos.y)));
        surface.fill_rect(corner.x, corner.y, camera.scale, camera.scale);
    }
}

// =============================================================
// Grid
// =============================================================

/// One path holding every row and column boundary, `0..=size`, stroked once.
fn draw_grid<S: Surface + ?Sized>(surface: &mut S, size: u32, camera: &Camera) {
    let edge = f64::from(size);
    surface.begin_path();
    for i in 0..=size {
        let i = f64::from(i);
        trace_line(surface, camera, Point::new(i, 0.0), Point::new(i, edge));
        trace_line(surface, camera, Point::new(0.0, i), Point::new(edge, i));
    }
    surface.stroke();
}

/// Add a grid-space segment to the current path, skipping segments that
/// collapse to a single canvas point.
fn trace_line<S: Surface + ?Sized>(surface: &mut S, camera: &Camera, from: Point, to: Point) {
    let a = camera.pixel_to_canvas(from);
    let b = camera.pixel_to_canvas(to);
    if a == b {
        return;
    }
    surface.move_to(a.x, a.y);
    surface.line_to(b.x, b.y);
}
