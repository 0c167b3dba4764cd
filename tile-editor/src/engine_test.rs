#![allow(clippy::float_cmp)]

use tiles::{Tile, TileMeta};

use super::*;
use crate::buffer::PaintMode;
use crate::color::SharedColor;

// =============================================================
// Helpers
// =============================================================

fn core16() -> EditorCore {
    EditorCore::new(EditorConfig::new(16)).expect("core")
}

fn origin() -> Point {
    Point::new(0.0, 0.0)
}

fn click(core: &mut EditorCore, x: f64, y: f64) -> Vec<Action> {
    core.on_click(PointerEvent::primary(x, y), origin())
}

fn has_painted(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::PixelPainted { .. }))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_core_is_empty_with_default_view() {
    let core = core16();
    assert!(core.buffer.is_empty());
    assert_eq!(core.buffer.size(), 16);
    assert_eq!(core.camera.scale, 50.0);
    assert_eq!(core.camera.offset_x, 0.0);
    assert_eq!(core.current_color().rgb(), 0xFF0000);
}

#[test]
fn initial_scale_respects_bounds() {
    let config = EditorConfig { initial_scale: 5000.0, max_scale: 200.0, ..EditorConfig::new(4) };
    assert_eq!(EditorCore::new(config).expect("core").camera.scale, 200.0);
}

#[test]
fn paint_mode_comes_from_config() {
    let config = EditorConfig { paint_mode: PaintMode::Preserve, ..EditorConfig::new(4) };
    assert_eq!(EditorCore::new(config).expect("core").buffer.mode(), PaintMode::Preserve);
}

#[test]
fn inverted_scale_bounds_are_rejected_at_construction() {
    let config = EditorConfig { min_scale: 100.0, max_scale: 10.0, ..EditorConfig::default() };
    let err = EditorCore::new(config).err().expect("inverted bounds");
    assert!(matches!(err, EditorError::InvalidConfig(_)));
}

#[test]
fn nan_scale_bound_is_rejected_at_construction() {
    let config = EditorConfig { max_scale: f64::NAN, ..EditorConfig::default() };
    assert!(matches!(EditorCore::with_color_source(config, Color::WHITE), Err(EditorError::InvalidConfig(_))));
}

#[test]
fn zero_tile_size_is_rejected_at_construction() {
    assert!(matches!(EditorCore::new(EditorConfig::new(0)), Err(EditorError::InvalidConfig(_))));
}

#[test]
fn oversized_tile_is_rejected_at_construction() {
    let err = EditorCore::new(EditorConfig::new(65_536)).err().expect("too large");
    assert!(err.to_string().contains("tile_size"));
}

// =============================================================
// Click → paint
// =============================================================

#[test]
fn any_point_inside_cell_paints_exactly_that_cell() {
    for (x, y) in [(150.0, 200.0), (199.0, 249.0), (175.5, 222.2), (150.0, 249.99)] {
        let mut core = core16();
        let actions = click(&mut core, x, y);
        assert!(has_painted(&actions), "({x}, {y})");
        assert!(needs_render(&actions));
        assert_eq!(core.buffer.len(), 1);
        assert_eq!(core.buffer.get_pixel(3, 4).map(Color::rgb), Some(0xFF0000));
    }
}

#[test]
fn click_subtracts_surface_origin() {
    let mut core = core16();
    core.on_click(PointerEvent::primary(160.0, 230.0), Point::new(10.0, 30.0));
    assert!(core.buffer.get_pixel(3, 4).is_some());
}

#[test]
fn click_respects_pan_offset() {
    let mut core = core16();
    core.camera.offset_x = 100.0;
    core.camera.offset_y = -50.0;
    click(&mut core, 110.0, 0.0);
    assert!(core.buffer.get_pixel(0, 1).is_some());
}

#[test]
fn click_outside_tile_is_silent_no_op() {
    let mut core = core16();
    for (x, y) in [(-1.0, 10.0), (10.0, -0.5), (800.0, 10.0), (10.0, 800.0)] {
        assert!(click(&mut core, x, y).is_empty());
    }
    assert!(core.buffer.is_empty());
}

#[test]
fn non_primary_click_does_nothing() {
    let mut core = core16();
    let ev = PointerEvent { client: Point::new(10.0, 10.0), button: Button::Secondary };
    assert!(core.on_click(ev, origin()).is_empty());
    assert!(core.buffer.is_empty());
}

#[test]
fn click_reads_latest_injected_color() {
    let picker = SharedColor::new(Color::BLACK);
    let mut core = EditorCore::with_color_source(EditorConfig::new(16), picker.clone()).expect("core");
    click(&mut core, 10.0, 10.0);
    picker.set_hex("#ff66ff").expect("color");
    click(&mut core, 60.0, 10.0);
    assert_eq!(core.buffer.get_pixel(0, 0), Some(Color::BLACK));
    assert_eq!(core.buffer.get_pixel(1, 0).map(Color::rgb), Some(0xFF66FF));
}

#[test]
fn repeated_click_is_idempotent() {
    let mut core = core16();
    click(&mut core, 10.0, 10.0);
    assert!(click(&mut core, 20.0, 20.0).is_empty());
    assert_eq!(core.buffer.len(), 1);
}

#[test]
fn overwrite_click_repaints_with_new_color() {
    let picker = SharedColor::new(Color::BLACK);
    let mut core = EditorCore::with_color_source(EditorConfig::new(4), picker.clone()).expect("core");
    click(&mut core, 10.0, 10.0);
    picker.set(Color::WHITE);
    assert!(has_painted(&click(&mut core, 10.0, 10.0)));
    assert_eq!(core.buffer.get_pixel(0, 0), Some(Color::WHITE));
}

#[test]
fn preserve_click_keeps_first_color() {
    let picker = SharedColor::new(Color::BLACK);
    let config = EditorConfig { paint_mode: PaintMode::Preserve, ..EditorConfig::new(4) };
    let mut core = EditorCore::with_color_source(config, picker.clone()).expect("core");
    click(&mut core, 10.0, 10.0);
    picker.set(Color::WHITE);
    assert!(click(&mut core, 10.0, 10.0).is_empty());
    assert_eq!(core.buffer.get_pixel(0, 0), Some(Color::BLACK));
}

#[test]
fn set_color_source_replaces_default() {
    let mut core = core16();
    core.set_color_source(Color::WHITE);
    assert_eq!(core.current_color(), Color::WHITE);
}

// =============================================================
// Wheel → pan
// =============================================================

#[test]
fn two_wheel_events_pan_by_twice_the_step() {
    let mut core = core16();
    let k = core.config().pan_sensitivity;
    core.on_wheel(WheelDelta::new(10.0, 0.0));
    let actions = core.on_wheel(WheelDelta::new(10.0, 0.0));
    assert_eq!(core.camera.offset_x, 2.0 * 10.0 * k);
    assert_eq!(core.camera.offset_x, -10.0);
    assert_eq!(core.camera.offset_y, 0.0);
    assert!(needs_render(&actions));
    assert!(core.buffer.is_empty());
}

#[test]
fn wheel_pan_never_touches_buffer_or_scale() {
    let mut core = core16();
    click(&mut core, 10.0, 10.0);
    let before = core.buffer.clone();
    core.on_wheel(WheelDelta::new(-37.0, 120.0));
    assert_eq!(core.buffer, before);
    assert_eq!(core.camera.scale, 50.0);
    assert_eq!(core.camera.offset_y, -60.0);
}

#[test]
fn wheel_reports_new_offset() {
    let mut core = core16();
    let actions = core.on_wheel(WheelDelta::new(4.0, -8.0));
    assert_eq!(actions[0], Action::Panned { offset_x: -2.0, offset_y: 4.0 });
}

#[test]
fn pan_sensitivity_is_configurable() {
    let config = EditorConfig { pan_sensitivity: 0.1, ..EditorConfig::new(4) };
    let mut core = EditorCore::new(config).expect("core");
    core.on_wheel(WheelDelta::new(0.0, 100.0));
    assert!((core.camera.offset_y - 10.0).abs() < 1e-9);
}

// =============================================================
// Programmatic API
// =============================================================

#[test]
fn paint_out_of_range_is_no_op() {
    let mut core = EditorCore::new(EditorConfig::new(4)).expect("core");
    assert!(core.paint(4, 0, Color::WHITE).is_empty());
    assert!(core.buffer.is_empty());
}

#[test]
fn clear_pixel_reports_and_unsets() {
    let mut core = core16();
    core.paint(2, 2, Color::WHITE);
    let actions = core.clear_pixel(2, 2);
    assert_eq!(actions[0], Action::PixelCleared { pos: GridPos::new(2, 2) });
    assert!(core.buffer.get_pixel(2, 2).is_none());
    assert!(core.clear_pixel(2, 2).is_empty());
    assert!(core.clear_pixel(99, 0).is_empty());
}

#[test]
fn set_scale_clamps_and_reports() {
    let mut core = core16();
    let actions = core.set_scale(1.0);
    assert_eq!(actions[0], Action::ScaleChanged { scale: 10.0 });
    assert_eq!(core.camera.scale, 10.0);
    assert!(core.set_scale(1.0).is_empty());
}

#[test]
fn set_viewport_records_size() {
    let mut core = core16();
    assert!(needs_render(&core.set_viewport(640.0, 480.0)));
    assert_eq!(core.viewport_width, 640.0);
    assert_eq!(core.viewport_height, 480.0);
    core.set_viewport(-5.0, 10.0);
    assert_eq!(core.viewport_width, 0.0);
}

// =============================================================
// Export / import
// =============================================================

#[test]
fn export_of_empty_editor_is_all_unset() {
    let core = EditorCore::new(EditorConfig::new(4)).expect("core");
    let tile = core.export_tile(TileMeta::named("blank")).expect("export");
    assert_eq!(tile.size, 4);
    assert_eq!(tile.pixels.len(), 16);
    assert!(tile.pixels.iter().all(Option::is_none));
    assert_eq!(tile.meta.name, "blank");
    assert!(tile.validate().is_ok());
}

#[test]
fn export_reflects_paint_and_clear() {
    let mut core = EditorCore::new(EditorConfig::new(4)).expect("core");
    core.paint(1, 2, Color::WHITE);
    core.paint(3, 3, Color::BLACK);
    core.clear_pixel(3, 3);
    let tile = core.export_tile(TileMeta::default()).expect("export");
    assert_eq!(tile.pixels[1 + 2 * 4], Some(0xFFFFFF));
    assert_eq!(tile.pixels[15], None);
    assert_eq!(tile.painted_count(), 1);
}

#[test]
fn load_tile_replaces_buffer() {
    let mut core = EditorCore::new(EditorConfig::new(2)).expect("core");
    core.paint(0, 0, Color::WHITE);
    let tile = Tile { meta: TileMeta::default(), size: 2, pixels: vec![None, None, Some(0x123456), None] };
    let actions = core.load_tile(&tile).expect("load");
    assert!(needs_render(&actions));
    assert!(core.buffer.get_pixel(0, 0).is_none());
    assert_eq!(core.buffer.get_pixel(0, 1).map(Color::rgb), Some(0x123456));
    assert_eq!(core.export_tile(TileMeta::default()).expect("export").pixels, tile.pixels);
}

#[test]
fn load_tile_rejects_size_mismatch() {
    let mut core = EditorCore::new(EditorConfig::new(2)).expect("core");
    let tile = Tile::blank(TileMeta::default(), 3).expect("blank");
    let err = core.load_tile(&tile).expect_err("mismatch");
    assert!(matches!(err, EditorError::TileSizeMismatch { expected: 2, found: 3 }));
}

#[test]
fn load_tile_rejects_inconsistent_tile() {
    let mut core = EditorCore::new(EditorConfig::new(2)).expect("core");
    core.paint(1, 1, Color::WHITE);
    let tile = Tile { meta: TileMeta::default(), size: 2, pixels: vec![None] };
    assert!(matches!(core.load_tile(&tile), Err(EditorError::InvalidTile(_))));
    assert_eq!(core.buffer.len(), 1);
}
