//! Error type shared by every editor operation.
//!
//! Fatal variants abort mounting and are returned to the host. Recoverable
//! variants come back from the programmatic API; the input handler turns them
//! into a no-op for the offending event.

use crate::lifecycle::ListenerKind;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The canvas element or its container is missing.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    /// The canvas refused to hand out a 2D context.
    #[error("2d drawing context unavailable: {0}")]
    ContextUnavailable(String),
    /// A grid coordinate fell outside `[0, size)`.
    #[error("grid coordinate ({x}, {y}) is outside a {size}x{size} tile")]
    OutOfRangeCoordinate { x: i64, y: i64, size: u32 },
    /// A color value does not fit in 24-bit RGB or could not be parsed.
    #[error("malformed color: {0}")]
    MalformedColor(String),
    /// An imported tile does not have the editor's size.
    #[error("cannot load a {found}x{found} tile into a {expected}x{expected} editor")]
    TileSizeMismatch { expected: u32, found: u32 },
    /// An imported tile has an inconsistent shape.
    #[error("invalid tile: {0}")]
    InvalidTile(#[from] tiles::TileError),
    /// The configuration parsed but holds unusable values.
    #[error("invalid editor config: {0}")]
    InvalidConfig(String),
    /// The configuration JSON could not be parsed.
    #[error("failed to parse editor config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// `on_mount` was called on an editor that is already mounted.
    #[error("tile editor is already mounted")]
    AlreadyMounted,
    /// The editor is in the middle of handling an event.
    #[error("tile editor is busy handling an event")]
    Busy,
    /// The host refused to register an event listener.
    #[error("failed to attach {kind} listener: {reason}")]
    ListenerAttach { kind: ListenerKind, reason: String },
}

impl EditorError {
    /// Whether this error prevents the editor from mounting at all.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SurfaceUnavailable(_) | Self::ContextUnavailable(_) | Self::AlreadyMounted | Self::ListenerAttach { .. }
        )
    }
}
