//! Integration tests for the json-master public API.
//!
//! These exercise complete save → load cycles on a real temporary directory,
//! covering the lenient read policy and the strict write policy together.

use std::collections::BTreeMap;
use std::fs;
use std::sync::Once;

use json_master::{
    load_json_config, load_json_config_or_default, read_file_content, save_json_config,
    save_json_config_with_encoding, ConfigFile, ConfigFileError, FileMode, SaveOptions,
    TextEncoding,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes library logs to the test harness.  Level is overridden by `RUST_LOG`.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Named {
    name: String,
    count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct AppSettings {
    title: String,
    volume: f64,
    fullscreen: bool,
    recent_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<String>,
    shortcuts: BTreeMap<String, String>,
    #[serde(default)]
    save: SaveOptions,
}

fn rich_settings() -> AppSettings {
    AppSettings {
        title: "Редактор \"quoted\" \u{1F600}".to_string(),
        volume: 0.75,
        fullscreen: true,
        recent_files: vec!["C:\\docs\\a.json".to_string(), "/tmp/b.json".to_string()],
        proxy: None,
        shortcuts: [("save", "Ctrl+S"), ("quit", "Ctrl+Q")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        save: SaveOptions {
            encoding: TextEncoding::Utf16Be,
            file_mode: FileMode::CreateNew,
        },
    }
}

// ── Round trips ───────────────────────────────────────────────────────────────

#[test]
fn test_save_then_load_alpha_scenario() {
    init_tracing();

    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    let value = Named {
        name: "alpha".to_string(),
        count: 3,
    };

    // Act
    save_json_config(&path, &value, FileMode::Create).unwrap();
    let loaded: Option<Named> = load_json_config(&path).unwrap();

    // Assert
    assert_eq!(loaded, Some(value));
    assert_eq!(
        read_file_content(&path).unwrap().as_deref(),
        Some(r#"{"name":"alpha","count":3}"#)
    );
}

#[test]
fn test_round_trip_in_every_encoding() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    for encoding in [
        TextEncoding::Utf8,
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
    ] {
        // Arrange
        let path = dir.path().join(format!("settings.{encoding}.json"));

        // Act
        save_json_config_with_encoding(&path, &rich_settings(), encoding, FileMode::Create)
            .unwrap();
        let loaded: Option<AppSettings> = load_json_config(&path).unwrap();

        // Assert
        assert_eq!(loaded, Some(rich_settings()), "failed for {encoding}");
    }
}

#[test]
fn test_ascii_encoding_loses_non_ascii_text() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ascii.json");
    let value = Named {
        name: "café".to_string(),
        count: 1,
    };

    // Act
    save_json_config_with_encoding(&path, &value, TextEncoding::Ascii, FileMode::Create).unwrap();
    let loaded: Option<Named> = load_json_config(&path).unwrap();

    // Assert
    assert_eq!(loaded.map(|n| n.name), Some("caf?".to_string()));
}

#[test]
fn test_dynamic_json_value_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value.json");
    let value = serde_json::json!({ "a": [1, 2, 3], "b": { "c": null } });

    save_json_config(&path, &value, FileMode::Create).unwrap();

    assert_eq!(
        load_json_config::<serde_json::Value>(&path).unwrap(),
        Some(value)
    );
}

// ── Lenient load ──────────────────────────────────────────────────────────────

#[test]
fn test_missing_empty_and_corrupt_files_are_indistinguishable_on_load() {
    init_tracing();

    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let empty = dir.path().join("empty.json");
    let corrupt = dir.path().join("corrupt.json");
    fs::write(&empty, b"").unwrap();
    fs::write(&corrupt, "{not valid json").unwrap();

    // Act / Assert
    for path in [&missing, &empty, &corrupt] {
        assert_eq!(load_json_config::<Named>(path).unwrap(), None, "{path:?}");
        assert_eq!(
            load_json_config_or_default::<Named>(path).unwrap(),
            Named::default()
        );
    }
}

#[test]
fn test_raw_read_distinguishes_missing_from_empty() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.json");
    fs::write(&empty, b"").unwrap();

    assert_eq!(read_file_content(&empty).unwrap(), Some(String::new()));
    assert_eq!(read_file_content(dir.path().join("missing.json")).unwrap(), None);
}

#[test]
fn test_partial_object_fills_serde_defaults() {
    // Arrange: `save` section omitted entirely
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{"title":"t","volume":1.0,"fullscreen":false,"recent_files":[],"shortcuts":{}}"#,
    )
    .unwrap();

    // Act
    let loaded: AppSettings = load_json_config(&path).unwrap().expect("must parse");

    // Assert
    assert_eq!(loaded.save, SaveOptions::default());
    assert_eq!(loaded.proxy, None);
}

// ── Strict save ───────────────────────────────────────────────────────────────

#[test]
fn test_exclusive_create_leaves_existing_bytes_untouched() {
    init_tracing();

    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    let original = [0xEF, 0xBB, 0xBF, b'{', b'}'];
    fs::write(&path, original).unwrap();

    // Act
    let err = save_json_config(&path, &rich_settings(), FileMode::CreateNew).unwrap_err();

    // Assert
    match err {
        ConfigFileError::AlreadyExists { path: p } => assert_eq!(p, path),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_invalid_arguments_do_not_touch_the_file_system() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");

    let empty_path = save_json_config("", &Named::default(), FileMode::Create);
    let absent_value = save_json_config(&path, &Option::<Named>::None, FileMode::CreateNew);

    assert!(matches!(
        empty_path,
        Err(ConfigFileError::InvalidArgument { argument: "path", .. })
    ));
    assert!(matches!(
        absent_value,
        Err(ConfigFileError::InvalidArgument { argument: "value", .. })
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_open_mode_on_missing_file_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = save_json_config(&path, &Named::default(), FileMode::Open).unwrap_err();

    assert!(matches!(err, ConfigFileError::Io { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_truncate_mode_replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    fs::write(&path, "a much longer previous document that must disappear").unwrap();

    save_json_config(&path, &Named::default(), FileMode::Truncate).unwrap();

    assert_eq!(
        read_file_content(&path).unwrap().as_deref(),
        Some(r#"{"name":"","count":0}"#)
    );
}

// ── Typed handle ──────────────────────────────────────────────────────────────

#[test]
fn test_handle_uses_options_loaded_from_json() {
    init_tracing();

    // Arrange: the save policy itself comes from configuration text
    let options: SaveOptions = serde_json::from_str(r#"{"encoding":"utf-16"}"#).unwrap();
    assert_eq!(options.encoding, TextEncoding::Utf16Le);
    let dir = tempfile::tempdir().unwrap();
    let file = ConfigFile::<AppSettings>::new(dir.path().join("app.json")).with_options(options);

    // Act
    file.save(&rich_settings()).unwrap();

    // Assert
    assert_eq!(file.load().unwrap(), Some(rich_settings()));
}
