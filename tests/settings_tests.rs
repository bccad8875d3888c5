use chartify_lab::settings::{FileSettingsStore, SettingsStore, Theme, ThemePreference, THEME_KEY};
use tempfile::tempdir;

#[test]
fn theme_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut pref = ThemePreference::load(Box::new(FileSettingsStore::open(&path)));
    assert_eq!(pref.theme(), Theme::System);
    pref.set(Theme::Dark).unwrap();
    assert!(path.exists());

    let reloaded = ThemePreference::load(Box::new(FileSettingsStore::open(&path)));
    assert_eq!(reloaded.theme(), Theme::Dark);
    assert_eq!(reloaded.marker(), Some(Theme::Dark));
}

#[test]
fn malformed_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileSettingsStore::open(&path);
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.get(THEME_KEY), None);
    assert_eq!(ThemePreference::load(Box::new(store)).theme(), Theme::System);
}

#[test]
fn unrelated_keys_are_preserved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "other": "kept", "theme": "light" }"#).unwrap();

    let mut store = FileSettingsStore::open(&path);
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    store.set(THEME_KEY, "system").unwrap();

    let reopened = FileSettingsStore::open(&path);
    assert_eq!(reopened.get("other").as_deref(), Some("kept"));
    assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("system"));
}
