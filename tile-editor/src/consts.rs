//! Shared numeric defaults for the tile editor.

// ── View ────────────────────────────────────────────────────────

/// Canvas pixels per grid cell when an editor is created.
pub const DEFAULT_SCALE: f64 = 50.0;

/// Smallest allowed scale unless configured otherwise.
pub const DEFAULT_MIN_SCALE: f64 = 10.0;

/// Largest allowed scale unless configured otherwise.
pub const DEFAULT_MAX_SCALE: f64 = 500.0;

/// Pan offset change per unit of wheel delta. Negative: scrolling down moves the grid up.
pub const DEFAULT_PAN_SENSITIVITY: f64 = -0.5;

// ── Grid ────────────────────────────────────────────────────────

/// Tile width and height in cells unless configured otherwise.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Largest accepted tile edge. `MAX_TILE_SIZE²` fits a 32-bit `usize`.
pub const MAX_TILE_SIZE: u32 = 4096;

// ── Color ───────────────────────────────────────────────────────

/// Paint color used when no color source has been supplied.
pub const DEFAULT_COLOR: u32 = 0xFF_0000;

/// Largest value representable as 24-bit RGB.
pub const MAX_RGB: u32 = 0xFF_FFFF;
