#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_sandbox_parameters() {
    let config = EditorConfig::default();
    assert_eq!(config.tile_size, 16);
    assert_eq!(config.min_scale, 10.0);
    assert_eq!(config.max_scale, 500.0);
    assert_eq!(config.initial_scale, 50.0);
    assert_eq!(config.pan_sensitivity, -0.5);
    assert_eq!(config.default_color.rgb(), 0xFF0000);
    assert_eq!(config.paint_mode, PaintMode::Overwrite);
    assert!(config.validate().is_ok());
}

#[test]
fn new_only_changes_tile_size() {
    let config = EditorConfig::new(32);
    assert_eq!(config.tile_size, 32);
    assert_eq!(config.initial_scale, EditorConfig::default().initial_scale);
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let config = EditorConfig::from_json(r#"{"tile_size": 8, "paint_mode": "preserve"}"#).expect("config");
    assert_eq!(config.tile_size, 8);
    assert_eq!(config.paint_mode, PaintMode::Preserve);
    assert_eq!(config.max_scale, 500.0);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(EditorConfig::from_json("{}").expect("config"), EditorConfig::default());
}

#[test]
fn from_json_rejects_malformed_json() {
    let err = EditorConfig::from_json("{tile_size: 8").expect_err("bad json");
    assert!(matches!(err, EditorError::ConfigParse(_)));
}

#[test]
fn from_json_rejects_wide_default_color() {
    let err = EditorConfig::from_json(r#"{"default_color": 16777216}"#).expect_err("bad color");
    assert!(matches!(err, EditorError::ConfigParse(_)));
}

#[test]
fn validate_rejects_zero_tile_size() {
    let err = EditorConfig::new(0).validate().expect_err("zero size");
    assert!(matches!(err, EditorError::InvalidConfig(_)));
    assert!(!err.is_fatal());
}

#[test]
fn validate_rejects_non_positive_min_scale() {
    let config = EditorConfig { min_scale: 0.0, ..EditorConfig::default() };
    assert!(matches!(config.validate(), Err(EditorError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_inverted_bounds() {
    let err = EditorConfig::from_json(r#"{"min_scale": 100, "max_scale": 20}"#).expect_err("inverted");
    assert!(err.to_string().contains("max_scale"));
}

#[test]
fn validate_rejects_non_finite_sensitivity() {
    let config = EditorConfig { pan_sensitivity: f64::NAN, ..EditorConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn initial_scale_is_clamped_into_bounds() {
    let config = EditorConfig { initial_scale: 1000.0, ..EditorConfig::default() };
    assert_eq!(config.clamped_initial_scale(), 500.0);
    let config = EditorConfig { initial_scale: 1.0, ..EditorConfig::default() };
    assert_eq!(config.clamped_initial_scale(), 10.0);
}

#[test]
fn validate_rejects_oversized_tile_size() {
    let err = EditorConfig::from_json(r#"{"tile_size": 65536}"#).expect_err("too large");
    assert!(matches!(err, EditorError::InvalidConfig(_)));
    assert!(EditorConfig::new(MAX_TILE_SIZE).validate().is_ok());
    assert!(EditorConfig::new(MAX_TILE_SIZE + 1).validate().is_err());
}
