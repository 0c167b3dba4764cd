//! Test doubles: a surface that records draw calls and a host that tracks
//! listener registrations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::camera::Point;
use crate::error::EditorError;
use crate::lifecycle::{Host, ListenerId, ListenerKind};
use crate::render::Surface;

/// One recorded drawing verb.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    ClearRect(f64, f64, f64, f64),
    FillColor(String),
    FillRect(f64, f64, f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn fill_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                Op::FillRect(x, y, w, h) => Some((x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Number of full frames drawn (each starts with a clear).
    pub fn frames(&self) -> usize {
        self.count(|op| matches!(op, Op::ClearRect(..)))
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::ClearRect(x, y, width, height));
    }

    fn set_fill_color(&mut self, css: &str) {
        self.ops.push(Op::FillColor(css.to_owned()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::FillRect(x, y, width, height));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
}

/// Listener bookkeeping shared with the test, so it outlives the editor.
#[derive(Debug, Default)]
pub struct Registry {
    pub attached: HashMap<ListenerId, ListenerKind>,
    pub attach_calls: usize,
    pub detach_calls: Vec<ListenerId>,
    pub releases: usize,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub surface: Option<RecordingSurface>,
    pub registry: Rc<RefCell<Registry>>,
    pub container: (f64, f64),
    pub backing: (f64, f64),
    pub origin: Point,
    pub fail_acquire: bool,
    pub fail_attach: Option<ListenerKind>,
    next_serial: u32,
}

impl FakeHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self { container: (width, height), ..Self::default() }
    }

    pub fn attached_count(&self) -> usize {
        self.registry.borrow().attached.len()
    }
}

impl Host for FakeHost {
    type Surface = RecordingSurface;

    fn acquire(&mut self) -> Result<(), EditorError> {
        if self.fail_acquire {
            return Err(EditorError::SurfaceUnavailable("no canvas in test host".to_owned()));
        }
        self.surface = Some(RecordingSurface::default());
        Ok(())
    }

    // Keeps the recorded surface so tests can inspect it after unmount.
    fn release(&mut self) {
        self.registry.borrow_mut().releases += 1;
    }

    fn surface(&mut self) -> Option<&mut RecordingSurface> {
        self.surface.as_mut()
    }

    fn container_size(&self) -> (f64, f64) {
        self.container
    }

    fn resize_surface(&mut self, width: f64, height: f64) {
        self.backing = (width, height);
    }

    fn surface_origin(&self) -> Point {
        self.origin
    }

    fn attach(&mut self, kind: ListenerKind) -> Result<ListenerId, EditorError> {
        let mut registry = self.registry.borrow_mut();
        registry.attach_calls += 1;
        if self.fail_attach == Some(kind) {
            return Err(EditorError::ListenerAttach { kind, reason: "refused by test host".to_owned() });
        }
        self.next_serial += 1;
        let id = ListenerId { kind, serial: self.next_serial };
        registry.attached.insert(id, kind);
        Ok(id)
    }

    fn detach(&mut self, id: ListenerId) {
        let mut registry = self.registry.borrow_mut();
        registry.detach_calls.push(id);
        registry.attached.remove(&id);
    }
}
