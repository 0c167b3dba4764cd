//! Browser binding: a [`Host`] over a real `<canvas>` and its parent element.
//!
//! Each DOM handler is wrapped in a [`Closure`] exactly once, when the editor
//! is created, and lives in [`WebHost`] for the editor's whole lifetime. Attach
//! and detach both pass that same function reference, so removing a listener
//! always removes the one that was added.
//!
//! Handlers reach the editor through a [`Weak`] reference. An event that
//! arrives after the editor is gone is dropped with a debug log; one that
//! arrives while the editor is already borrowed is logged as a warning.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use tiles::{Tile, TileMeta};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent};

use crate::camera::Point;
use crate::engine::EditorCore;
use crate::error::EditorError;
use crate::input::{Button, PointerEvent, WheelDelta};
use crate::lifecycle::{Host, ListenerId, ListenerKind, TileEditor};

type SharedEditor = Rc<RefCell<TileEditor<WebHost>>>;
type WeakEditor = Weak<RefCell<TileEditor<WebHost>>>;

/// The three DOM handlers, bound once per editor.
struct Handlers {
    resize: Closure<dyn FnMut(Event)>,
    click: Closure<dyn FnMut(MouseEvent)>,
    wheel: Closure<dyn FnMut(WheelEvent)>,
}

impl Handlers {
    fn bind(editor: &WeakEditor) -> Self {
        let resize = {
            let editor = editor.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                dispatch(&editor, ListenerKind::Resize, |ed| {
                    ed.handle_resize();
                });
            }) as Box<dyn FnMut(Event)>)
        };
        let click = {
            let editor = editor.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let Some(button) = Button::from_dom(event.button()) else {
                    return;
                };
                let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                dispatch(&editor, ListenerKind::Click, |ed| {
                    ed.handle_click(PointerEvent { client, button });
                });
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let wheel = {
            let editor = editor.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                event.prevent_default();
                let delta = WheelDelta::new(event.delta_x(), event.delta_y());
                dispatch(&editor, ListenerKind::Wheel, |ed| {
                    ed.handle_wheel(delta);
                });
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        Self { resize, click, wheel }
    }

    fn function(&self, kind: ListenerKind) -> &js_sys::Function {
        match kind {
            ListenerKind::Resize => self.resize.as_ref().unchecked_ref(),
            ListenerKind::Click => self.click.as_ref().unchecked_ref(),
            ListenerKind::Wheel => self.wheel.as_ref().unchecked_ref(),
        }
    }
}

fn dispatch(editor: &WeakEditor, kind: ListenerKind, f: impl FnOnce(&mut TileEditor<WebHost>)) {
    let Some(cell) = editor.upgrade() else {
        debug!("{kind} event after the tile editor was dropped");
        return;
    };
    let Ok(mut ed) = cell.try_borrow_mut() else {
        warn!("{kind} event arrived while the tile editor was busy; event not applied");
        return;
    };
    f(&mut ed);
}

/// [`Host`] backed by an `HtmlCanvasElement`.
pub struct WebHost {
    canvas: HtmlCanvasElement,
    container: Option<HtmlElement>,
    ctx: Option<CanvasRenderingContext2d>,
    handlers: Handlers,
    next_serial: u32,
}

impl WebHost {
    fn new(canvas: HtmlCanvasElement, handlers: Handlers) -> Self {
        Self { canvas, container: None, ctx: None, handlers, next_serial: 0 }
    }

    /// Resize events come from the window; everything else from the canvas.
    fn with_target<R>(&self, kind: ListenerKind, f: impl FnOnce(&EventTarget) -> R) -> Result<R, EditorError> {
        match kind {
            ListenerKind::Resize => {
                let window = web_sys::window()
                    .ok_or_else(|| EditorError::SurfaceUnavailable("no window to watch for resizes".to_owned()))?;
                Ok(f(&window))
            }
            ListenerKind::Click | ListenerKind::Wheel => Ok(f(&self.canvas)),
        }
    }
}

impl Host for WebHost {
    type Surface = CanvasRenderingContext2d;

    fn acquire(&mut self) -> Result<(), EditorError> {
        let container = self
            .canvas
            .parent_element()
            .ok_or_else(|| EditorError::SurfaceUnavailable("canvas is not attached to a container".to_owned()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| EditorError::SurfaceUnavailable("canvas container is not an HTML element".to_owned()))?;
        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|err| EditorError::ContextUnavailable(format!("{err:?}")))?
            .ok_or_else(|| EditorError::ContextUnavailable("canvas returned no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EditorError::ContextUnavailable("context is not a CanvasRenderingContext2d".to_owned()))?;
        self.container = Some(container);
        self.ctx = Some(ctx);
        Ok(())
    }

    fn release(&mut self) {
        self.ctx = None;
        self.container = None;
    }

    fn surface(&mut self) -> Option<&mut CanvasRenderingContext2d> {
        self.ctx.as_mut()
    }

    fn container_size(&self) -> (f64, f64) {
        match &self.container {
            Some(container) => (f64::from(container.offset_width()), f64::from(container.offset_height())),
            None => (f64::from(self.canvas.width()), f64::from(self.canvas.height())),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize_surface(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0).round() as u32);
        self.canvas.set_height(height.max(0.0).round() as u32);
    }

    fn surface_origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn attach(&mut self, kind: ListenerKind) -> Result<ListenerId, EditorError> {
        let function = self.handlers.function(kind);
        self.with_target(kind, |target| target.add_event_listener_with_callback(kind.event_name(), function))?
            .map_err(|err| EditorError::ListenerAttach { kind, reason: format!("{err:?}") })?;
        self.next_serial += 1;
        Ok(ListenerId { kind, serial: self.next_serial })
    }

    fn detach(&mut self, id: ListenerId) {
        let function = self.handlers.function(id.kind);
        let removed = self.with_target(id.kind, |target| {
            target.remove_event_listener_with_callback(id.kind.event_name(), function)
        });
        match removed {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("failed to detach {} listener: {err:?}", id.kind),
            Err(err) => warn!("failed to detach {} listener: {err}", id.kind),
        }
    }
}

/// A mounted editor living on a page.
///
/// Dropping the handle unmounts the editor and detaches its listeners.
pub struct WebEditor {
    inner: SharedEditor,
}

impl WebEditor {
    /// Run `f` against the editor, unless an event handler is using it.
    pub fn with_editor<R>(&self, f: impl FnOnce(&mut TileEditor<WebHost>) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut ed) => Some(f(&mut ed)),
            Err(_) => {
                warn!("tile editor is busy; call skipped");
                None
            }
        }
    }

    /// Snapshot the current tile.
    ///
    /// # Errors
    ///
    /// [`EditorError::Busy`] when called from inside an event handler, or
    /// whatever [`TileEditor::export_tile`] reports.
    pub fn export_tile(&self, meta: TileMeta) -> Result<Tile, EditorError> {
        self.with_editor(|ed| ed.export_tile(meta)).ok_or(EditorError::Busy)?
    }

    /// Unmount now rather than at drop.
    pub fn unmount(self) {
        self.with_editor(TileEditor::on_unmount);
    }
}

/// Look up a canvas element by id in the current document.
///
/// # Errors
///
/// [`EditorError::SurfaceUnavailable`] if there is no document, no such element,
/// or the element is not a `<canvas>`.
pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement, EditorError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EditorError::SurfaceUnavailable("no document".to_owned()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| EditorError::SurfaceUnavailable(format!("no element with id {id:?}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EditorError::SurfaceUnavailable(format!("element {id:?} is not a canvas")))
}

/// Bind an editor to `canvas` and mount it.
///
/// # Errors
///
/// Any fatal [`EditorError`] from mounting; nothing stays attached on failure.
pub fn mount(canvas: HtmlCanvasElement, core: EditorCore) -> Result<WebEditor, EditorError> {
    let inner: SharedEditor = Rc::new_cyclic(|weak: &WeakEditor| {
        let host = WebHost::new(canvas, Handlers::bind(weak));
        RefCell::new(TileEditor::new(host, core))
    });
    let mounted = inner.borrow_mut().on_mount();
    mounted?;
    Ok(WebEditor { inner })
}

/// [`find_canvas`] then [`mount`].
///
/// # Errors
///
/// See [`find_canvas`] and [`mount`].
pub fn mount_by_id(id: &str, core: EditorCore) -> Result<WebEditor, EditorError> {
    mount(find_canvas(id)?, core)
}
