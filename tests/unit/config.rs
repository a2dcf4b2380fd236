use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = DisplayConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.dot_spacing, 15.0);
    assert_eq!(cfg.max_attempts, 50);
    assert!((cfg.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = DisplayConfig::from_json_str(r#"{ "dot_spacing": 20, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.dot_spacing, 20.0);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.warm_up_ms, 1000);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = DisplayConfig::from_json_str(r#"{ "dot_spacingg": 20 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn invalid_values_fail_validation() {
    for json in [
        r#"{ "dot_spacing": 0 }"#,
        r#"{ "target_fps": 0 }"#,
        r#"{ "transition_step": 1.5 }"#,
        r#"{ "easing": 0 }"#,
        r#"{ "max_attempts": 0 }"#,
        r#"{ "glow_blur": -1 }"#,
    ] {
        let err = DisplayConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("config error:"), "{json}: {err}");
    }
}

#[test]
fn out_of_range_sizes_fail_validation() {
    for json in [
        r#"{ "dot_spacing": 1e-300 }"#,
        r#"{ "dot_spacing": 0.5 }"#,
        r#"{ "grid_margin": 18446744073709551615 }"#,
        r#"{ "grid_margin": 65 }"#,
        r#"{ "placement_padding": 1000 }"#,
        r#"{ "char_spacing": 4294967296 }"#,
    ] {
        let err = DisplayConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("config error:"), "{json}: {err}");
    }
}

#[test]
fn size_bounds_are_inclusive() {
    let cfg = DisplayConfig::from_json_str(
        r#"{ "dot_spacing": 1, "grid_margin": 64, "placement_padding": 64, "char_spacing": 64 }"#,
    )
    .unwrap();
    assert_eq!(cfg.dot_spacing, MIN_DOT_SPACING);
    assert_eq!(cfg.grid_margin, MAX_CELL_GAP);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = DisplayConfig::from_json_path(Path::new("/nonexistent/dotmatrix.json")).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}
