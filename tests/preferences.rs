use complication_config::constants::{PREFERENCE_FILE_KEY, SAVED_BACKGROUND_COLOR};
use complication_config::preferences::{
    AppearancePreferences, FilePreferencesStore, MemoryPreferencesStore, PreferencesStore,
};
use complication_config::utils::color::Rgb;
use std::fs;
use std::path::PathBuf;

fn temp_prefs_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("complication_config_prefs_{}", name));
    let _ = fs::remove_dir_all(&dir);
    dir.join("preferences.toml")
}

#[test]
fn test_defaults() {
    let prefs = AppearancePreferences::default();
    assert_eq!(prefs.background_color, Rgb::BLACK);
    assert_eq!(prefs.highlight_color, Rgb::RED);
    assert!(prefs.unread_notifications_enabled);
}

#[test]
fn test_missing_file_loads_defaults() {
    let path = temp_prefs_path("missing");
    let store = FilePreferencesStore::new(&path);
    assert_eq!(store.load().unwrap(), AppearancePreferences::default());
    assert!(!path.exists());
}

#[test]
fn test_save_then_load() {
    let path = temp_prefs_path("save_load");
    let store = FilePreferencesStore::new(&path);

    let prefs = AppearancePreferences {
        background_color: Rgb::WHITE,
        highlight_color: Rgb::new(0x21, 0x96, 0xF3),
        unread_notifications_enabled: false,
    };
    store.save(&prefs).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(PREFERENCE_FILE_KEY));
    assert!(content.contains("saved_markers_color = \"#2196F3\""));

    // A fresh store over the same file sees the saved values
    let reopened = FilePreferencesStore::new(&path);
    assert_eq!(reopened.load().unwrap(), prefs);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_namespaces_do_not_clobber_each_other() {
    let path = temp_prefs_path("namespaces");
    let face_a = FilePreferencesStore::with_namespace(&path, "face.a");
    let face_b = FilePreferencesStore::with_namespace(&path, "face.b");

    let mut prefs = AppearancePreferences::default();
    prefs.background_color = Rgb::WHITE;
    face_a.save(&prefs).unwrap();
    face_b.save(&AppearancePreferences::default()).unwrap();

    assert_eq!(face_a.load().unwrap().background_color, Rgb::WHITE);
    assert_eq!(face_b.load().unwrap().background_color, Rgb::BLACK);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_bad_saved_color_falls_back_to_default() {
    let path = temp_prefs_path("bad_color");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        format!(
            "[\"{}\"]\n{} = \"not-a-color\"\nsaved_unread_notifications = false\n",
            PREFERENCE_FILE_KEY, SAVED_BACKGROUND_COLOR
        ),
    )
    .unwrap();

    let prefs = FilePreferencesStore::new(&path).load().unwrap();
    assert_eq!(prefs.background_color, Rgb::BLACK);
    assert!(!prefs.unread_notifications_enabled);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_memory_store_counts_saves() {
    let store = MemoryPreferencesStore::new();
    let shared = store.clone();

    let mut prefs = store.load().unwrap();
    prefs.unread_notifications_enabled = false;
    store.save(&prefs).unwrap();

    assert_eq!(shared.save_count(), 1);
    assert!(!shared.snapshot().unread_notifications_enabled);
}

#[test]
fn test_save_replaces_corrupt_file() {
    let path = temp_prefs_path("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    // Truncated mid-write
    fs::write(&path, format!("[\"{}\"]\nsaved_background_color = \"#FF", PREFERENCE_FILE_KEY)).unwrap();

    let store = FilePreferencesStore::new(&path);
    assert!(store.load().is_err());

    let prefs = AppearancePreferences {
        background_color: Rgb::WHITE,
        highlight_color: Rgb::RED,
        unread_notifications_enabled: false,
    };
    store.save(&prefs).unwrap();
    assert_eq!(store.load().unwrap(), prefs);

    // No staging file is left next to the preferences
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("preferences.toml")]);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}
