//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Settings roundtrip
//! - Config path handling

use std::path::PathBuf;
use vaglog::settings::UserSettings;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("vaglog-settings-{}", std::process::id()))
        .join(name)
}

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_default_values() {
    let settings = UserSettings::default();
    assert_eq!(settings.version, 1);
    assert!(settings.pretty_json);
    assert!(!settings.include_index);
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_serialize_default() {
    let settings = UserSettings::default();
    let json = serde_json::to_string(&settings).unwrap();

    assert!(json.contains("version"));
    assert!(json.contains("pretty_json"));
    assert!(json.contains("include_index"));
}

#[test]
fn test_settings_deserialize_missing_fields() {
    let settings: UserSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, UserSettings::default());
}

#[test]
fn test_settings_deserialize_partial() {
    let json = r#"{"include_index":true}"#;
    let settings: UserSettings = serde_json::from_str(json).unwrap();

    assert_eq!(settings.version, 1);
    assert!(settings.pretty_json);
    assert!(settings.include_index);
}

// ============================================
// Persistence Tests
// ============================================

#[test]
fn test_settings_roundtrip_file() {
    let path = scratch_path("roundtrip.json");
    let settings = UserSettings {
        version: 1,
        pretty_json: false,
        include_index: true,
    };

    settings.save_to(&path).unwrap();
    let loaded = UserSettings::load_from(&path);
    assert_eq!(loaded, settings);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_settings_missing_file_uses_defaults() {
    let loaded = UserSettings::load_from(&scratch_path("does-not-exist.json"));
    assert_eq!(loaded, UserSettings::default());
}

#[test]
fn test_settings_invalid_file_uses_defaults() {
    let path = scratch_path("invalid.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    assert_eq!(UserSettings::load_from(&path), UserSettings::default());

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_settings_path_file_name() {
    if let Some(path) = UserSettings::get_settings_path() {
        assert_eq!(path.file_name().unwrap(), "settings.json");
        assert!(path.parent().unwrap().ends_with("vaglog"));
    }
}
