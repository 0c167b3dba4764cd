//! Sandbox page: one tile editor on `#tile-editor`, painted with the color
//! chosen in `#color-picker`.
//!
//! Optional attributes on the canvas:
//! - `data-config`: JSON [`EditorConfig`]; absent means defaults.
//! - `data-log-level`: `error`, `warn`, `info`, `debug` or `trace` (default `info`).

use std::cell::RefCell;
use std::str::FromStr;

use log::{Level, error, info, warn};
use tile_editor::color::{Color, SharedColor};
use tile_editor::config::EditorConfig;
use tile_editor::engine::EditorCore;
use tile_editor::error::EditorError;
use tile_editor::web::{self, WebEditor};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlCanvasElement, HtmlInputElement};

const CANVAS_ID: &str = "tile-editor";
const PICKER_ID: &str = "color-picker";
const INITIAL_COLOR: u32 = 0xFF_66FF;

thread_local! {
    // Keeps the editor mounted for the life of the page.
    static EDITOR: RefCell<Option<WebEditor>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();
    let canvas = web::find_canvas(CANVAS_ID);
    let level = canvas
        .as_ref()
        .ok()
        .and_then(|c| c.get_attribute("data-log-level"))
        .and_then(|raw| Level::from_str(&raw).ok())
        .unwrap_or(Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }

    match canvas.and_then(run) {
        Ok(editor) => EDITOR.with(|slot| *slot.borrow_mut() = Some(editor)),
        Err(err) => error!("tile editor failed to start: {err}"),
    }
}

fn run(canvas: HtmlCanvasElement) -> Result<WebEditor, EditorError> {
    let config = match canvas.get_attribute("data-config") {
        Some(json) => EditorConfig::from_json(&json)?,
        None => EditorConfig::default(),
    };
    let color = SharedColor::new(Color::clamped(INITIAL_COLOR));
    bind_picker(&color);
    let core = EditorCore::with_color_source(config, color)?;
    let editor = web::mount(canvas, core)?;
    info!("sandbox ready");
    Ok(editor)
}

/// Push every `input` event from the picker into the shared color.
fn bind_picker(color: &SharedColor) {
    let Some(picker) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(PICKER_ID))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        warn!("no #{PICKER_ID} input; painting with the initial color only");
        return;
    };
    if let Err(err) = color.set_hex(&picker.value()) {
        warn!("ignoring picker's initial value: {err}");
    }

    let shared = color.clone();
    let input = picker.clone();
    let on_input = Closure::wrap(Box::new(move |_event: Event| {
        if let Err(err) = shared.set_hex(&input.value()) {
            warn!("ignoring picker value: {err}");
        }
    }) as Box<dyn FnMut(Event)>);
    if let Err(err) = picker.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref()) {
        warn!("could not listen to #{PICKER_ID}: {err:?}");
    }
    // Lives as long as the page.
    on_input.forget();
}
