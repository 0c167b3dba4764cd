use log::debug;
use tiles::{Tile, TileMeta};

use crate::buffer::PaintBuffer;
use crate::camera::{Camera, GridPos, Point};
use crate::color::{Color, ColorSource};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::input::{Button, PointerEvent, WheelDelta};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Effects of an editor operation, reported back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PixelPainted { pos: GridPos, color: Color },
    PixelCleared { pos: GridPos },
    Panned { offset_x: f64, offset_y: f64 },
    ScaleChanged { scale: f64 },
    TileLoaded,
    RenderNeeded,
}

/// Whether any action in the list asks for a redraw.
#[must_use]
pub fn needs_render(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}

/// Editor state that does not depend on a drawing surface.
///
/// Separated from [`crate::lifecycle::TileEditor`] so the input handler can be
/// tested without a host. Operations mutate state and return the resulting
/// [`Action`]s; they never draw.
pub struct EditorCore {
    pub buffer: PaintBuffer,
    pub camera: Camera,
    pub viewport_width: f64,
    pub viewport_height: f64,
    config: EditorConfig,
    color: Box<dyn ColorSource>,
}

impl EditorCore {
    /// Editor painting with `config.default_color`.
    ///
    /// # Errors
    ///
    /// See [`EditorCore::with_color_source`].
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        let color = config.default_color;
        Self::with_color_source(config, color)
    }

    /// Editor painting with whatever `source` reports at click time.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] when `config` fails
    /// [`EditorConfig::validate`]; nothing is built in that case.
    pub fn with_color_source(config: EditorConfig, source: impl ColorSource + 'static) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            buffer: PaintBuffer::with_mode(config.tile_size, config.paint_mode),
            camera: Camera::with_scale(config.clamped_initial_scale()),
            viewport_width: 0.0,
            viewport_height: 0.0,
            config,
            color: Box::new(source),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Swap the color source.
    pub fn set_color_source(&mut self, source: impl ColorSource + 'static) {
        self.color = Box::new(source);
    }

    /// The color the next click would paint.
    #[must_use]
    pub fn current_color(&self) -> Color {
        self.color.current()
    }

    // --- Input events ---

    /// Click → paint.
    ///
    /// `origin` is the surface's top-left corner in client coordinates. Clicks
    /// outside the tile and non-primary buttons are ignored.
    pub fn on_click(&mut self, event: PointerEvent, origin: Point) -> Vec<Action> {
        if event.button != Button::Primary {
            return Vec::new();
        }
        let canvas = event.client.relative_to(origin);
        let (gx, gy) = self.camera.canvas_to_grid(canvas);
        let Some(pos) = self.buffer.cell_at(gx, gy) else {
            debug!("click at ({}, {}) maps to ({gx}, {gy}), outside the tile", canvas.x, canvas.y);
            return Vec::new();
        };
        let color = self.current_color();
        self.paint(pos.x, pos.y, color)
    }

    /// Wheel → pan by `delta * pan_sensitivity`. Never touches the buffer.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let k = self.config.pan_sensitivity;
        self.camera.pan_by(delta.dx * k, delta.dy * k);
        vec![
            Action::Panned { offset_x: self.camera.offset_x, offset_y: self.camera.offset_y },
            Action::RenderNeeded,
        ]
    }

    // --- Programmatic mutations ---

    /// Paint one cell. Out-of-range cells are a logged no-op.
    pub fn paint(&mut self, x: u32, y: u32, color: Color) -> Vec<Action> {
        match self.buffer.set_pixel(x, y, color) {
            Ok(true) => vec![Action::PixelPainted { pos: GridPos { x, y }, color }, Action::RenderNeeded],
            Ok(false) => Vec::new(),
            Err(err) => {
                debug!("paint ignored: {err}");
                Vec::new()
            }
        }
    }

    /// Unset one cell. Out-of-range cells are a logged no-op.
    pub fn clear_pixel(&mut self, x: u32, y: u32) -> Vec<Action> {
        match self.buffer.clear_pixel(x, y) {
            Ok(true) => vec![Action::PixelCleared { pos: GridPos { x, y } }, Action::RenderNeeded],
            Ok(false) => Vec::new(),
            Err(err) => {
                debug!("clear ignored: {err}");
                Vec::new()
            }
        }
    }

    /// Set the zoom, clamped to the configured bounds.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        let before = self.camera.scale;
        let after = self.camera.set_scale(scale, self.config.min_scale, self.config.max_scale);
        if before.to_bits() == after.to_bits() {
            return Vec::new();
        }
        vec![Action::ScaleChanged { scale: after }, Action::RenderNeeded]
    }

    /// Record the surface's size in canvas pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
        vec![Action::RenderNeeded]
    }

    // --- Tile contract ---

    /// Snapshot the buffer as a [`Tile`] record.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTile`] if the grid cannot be laid out
    /// densely on this target.
    pub fn export_tile(&self, meta: TileMeta) -> Result<Tile, EditorError> {
        Ok(Tile { meta, size: self.buffer.size(), pixels: self.buffer.to_pixels()? })
    }

    /// Replace the buffer contents with a tile's pixels.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::TileSizeMismatch`] when sizes differ,
    /// [`EditorError::InvalidTile`] for an inconsistent pixel array and
    /// [`EditorError::MalformedColor`] for colors past 24 bits. The buffer is
    /// unchanged on error.
    pub fn load_tile(&mut self, tile: &Tile) -> Result<Vec<Action>, EditorError> {
        if tile.size != self.buffer.size() {
            return Err(EditorError::TileSizeMismatch { expected: self.buffer.size(), found: tile.size });
        }
        tile.validate()?;
        self.buffer.load_pixels(&tile.pixels)?;
        Ok(vec![Action::TileLoaded, Action::RenderNeeded])
    }
}
