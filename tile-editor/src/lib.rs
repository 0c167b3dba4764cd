//! Pixel-art tile editor for the browser.
//!
//! This crate is compiled to WebAssembly and drives a single `<canvas>`: it
//! turns raw click and wheel events into paint and pan operations on a fixed
//! `size × size` grid, redraws the grid after every change, and owns the event
//! listeners it attaches to the page. The editor logic is host-agnostic; the
//! browser binding in [`web`] is a thin adapter over [`lifecycle::Host`] and
//! [`render::Surface`].
//!
//! Finished work leaves the editor as a [`tiles::Tile`] record via
//! [`engine::EditorCore::export_tile`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable editor state and the input handler ([`engine::EditorCore`]) |
//! | [`lifecycle`] | Mount / unmount state machine over a [`lifecycle::Host`] |
//! | [`buffer`] | Sparse paint buffer keyed by grid position |
//! | [`camera`] | Pan/scale view state and grid ↔ canvas conversions |
//! | [`render`] | Full redraw onto a [`render::Surface`] |
//! | [`input`] | Pointer and wheel event types |
//! | [`color`] | 24-bit colors and the injected current-color source |
//! | [`config`] | Construction parameters, loadable from JSON |
//! | [`error`] | [`error::EditorError`] |
//! | [`web`] | `web_sys` host, surface and listener binding |
//! | [`consts`] | Shared numeric defaults |

pub mod buffer;
pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod web;

#[cfg(test)]
mod testing;
