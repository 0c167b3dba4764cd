//! Surface lifecycle: mount, re-render on change, unmount.
//!
//! [`TileEditor`] pairs an [`EditorCore`] with a [`Host`] that owns the real
//! drawing surface and event registrations. The lifecycle is strictly
//! `Unmounted → Mounted → Unmounted`.
//!
//! Listener identity matters: every [`ListenerId`] handed out by
//! [`Host::attach`] is kept and passed back to [`Host::detach`] on unmount, so
//! the host can remove the exact handler it registered. A failed mount, an
//! explicit unmount, and dropping the editor all go through the same teardown.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::fmt;

use log::{error, info};
use tiles::{Tile, TileMeta};

use crate::camera::Point;
use crate::color::Color;
use crate::engine::{Action, EditorCore, needs_render};
use crate::error::EditorError;
use crate::input::{PointerEvent, WheelDelta};
use crate::render::{self, Surface};

/// The events the editor listens for while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// The container (or window) changed size.
    Resize,
    /// A click on the surface.
    Click,
    /// A wheel / trackpad scroll over the surface.
    Wheel,
}

impl ListenerKind {
    /// Every kind, in attach order.
    pub const ALL: [ListenerKind; 3] = [Self::Resize, Self::Click, Self::Wheel];

    /// DOM event name.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Click => "click",
            Self::Wheel => "wheel",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Handle for one registered listener, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    pub kind: ListenerKind,
    pub serial: u32,
}

/// The environment an editor is mounted into.
pub trait Host {
    type Surface: Surface;

    /// Acquire the drawing surface and its container.
    ///
    /// # Errors
    ///
    /// [`EditorError::SurfaceUnavailable`] or [`EditorError::ContextUnavailable`].
    fn acquire(&mut self) -> Result<(), EditorError>;

    /// Drop whatever [`Host::acquire`] obtained. Safe to call when nothing was acquired.
    fn release(&mut self);

    /// The acquired surface, if any.
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Current on-screen size of the surface's container.
    fn container_size(&self) -> (f64, f64);

    /// Resize the surface's backing store.
    fn resize_surface(&mut self, width: f64, height: f64);

    /// Top-left corner of the surface in client coordinates.
    fn surface_origin(&self) -> Point;

    /// Register the handler for `kind`.
    ///
    /// # Errors
    ///
    /// [`EditorError::ListenerAttach`] if the host refuses the registration.
    fn attach(&mut self, kind: ListenerKind) -> Result<ListenerId, EditorError>;

    /// Remove a handler registered by [`Host::attach`].
    fn detach(&mut self, id: ListenerId);
}

/// Where an editor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Unmounted,
    Mounted,
}

/// An editor bound to a host.
///
/// While mounted, every mutation is followed by a synchronous full redraw.
/// While unmounted, mutations only update the core.
pub struct TileEditor<H: Host> {
    pub core: EditorCore,
    host: H,
    state: LifecycleState,
    listeners: Vec<ListenerId>,
}

impl<H: Host> TileEditor<H> {
    #[must_use]
    pub fn new(host: H, core: EditorCore) -> Self {
        Self { core, host, state: LifecycleState::Unmounted, listeners: Vec::new() }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state == LifecycleState::Mounted
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    // --- Lifecycle ---

    /// Acquire the surface, size it, attach listeners and draw the first frame.
    ///
    /// On failure everything acquired so far is released and the editor stays
    /// unmounted.
    ///
    /// # Errors
    ///
    /// [`EditorError::AlreadyMounted`], or whatever the host reports while
    /// acquiring the surface or attaching listeners.
    pub fn on_mount(&mut self) -> Result<(), EditorError> {
        if self.is_mounted() {
            return Err(EditorError::AlreadyMounted);
        }
        if let Err(err) = self.acquire_and_attach() {
            self.teardown();
            return Err(err);
        }
        self.state = LifecycleState::Mounted;
        self.fit_to_container();
        self.redraw();
        info!("tile editor mounted ({0}x{0} cells)", self.core.buffer.size());
        Ok(())
    }

    /// Redraw after an external change to [`TileEditor::core`].
    pub fn on_update(&mut self) {
        self.redraw();
    }

    /// Detach every listener and release the surface. No-op when unmounted.
    pub fn on_unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.teardown();
        self.state = LifecycleState::Unmounted;
        info!("tile editor unmounted");
    }

    // --- Event entry points ---

    pub fn handle_click(&mut self, event: PointerEvent) -> Vec<Action> {
        let origin = self.host.surface_origin();
        let actions = self.core.on_click(event, origin);
        self.apply(actions)
    }

    pub fn handle_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let actions = self.core.on_wheel(delta);
        self.apply(actions)
    }

    pub fn handle_resize(&mut self) -> Vec<Action> {
        let actions = self.fit_to_container();
        self.apply(actions)
    }

    // --- Programmatic mutations (mutate, then render) ---

    pub fn paint(&mut self, x: u32, y: u32, color: Color) -> Vec<Action> {
        let actions = self.core.paint(x, y, color);
        self.apply(actions)
    }

    pub fn clear_pixel(&mut self, x: u32, y: u32) -> Vec<Action> {
        let actions = self.core.clear_pixel(x, y);
        self.apply(actions)
    }

    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        let actions = self.core.set_scale(scale);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// See [`EditorCore::load_tile`].
    pub fn load_tile(&mut self, tile: &Tile) -> Result<Vec<Action>, EditorError> {
        let actions = self.core.load_tile(tile)?;
        Ok(self.apply(actions))
    }

    /// # Errors
    ///
    /// See [`EditorCore::export_tile`].
    pub fn export_tile(&self, meta: TileMeta) -> Result<Tile, EditorError> {
        self.core.export_tile(meta)
    }

    // --- Internals ---

    fn acquire_and_attach(&mut self) -> Result<(), EditorError> {
        self.host.acquire()?;
        for kind in ListenerKind::ALL {
            let id = self.host.attach(kind)?;
            self.listeners.push(id);
        }
        Ok(())
    }

    fn teardown(&mut self) {
        for id in self.listeners.drain(..) {
            self.host.detach(id);
        }
        self.host.release();
    }

    fn fit_to_container(&mut self) -> Vec<Action> {
        let (width, height) = self.host.container_size();
        self.host.resize_surface(width, height);
        self.core.set_viewport(width, height)
    }

    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if needs_render(&actions) {
            self.redraw();
        }
        actions
    }

    fn redraw(&mut self) {
        if !self.is_mounted() {
            return;
        }
        let surface = self.host.surface();
        debug_assert!(surface.is_some(), "mounted tile editor has no drawing surface");
        let Some(surface) = surface else {
            error!("mounted tile editor has no drawing surface; frame skipped");
            return;
        };
        render::draw(
            surface,
            &self.core.buffer,
            &self.core.camera,
            self.core.viewport_width,
            self.core.viewport_height,
        );
    }
}

impl<H: Host> Drop for TileEditor<H> {
    fn drop(&mut self) {
        self.on_unmount();
    }
}
