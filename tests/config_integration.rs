// SPDX-License-Identifier: MPL-2.0
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wonder_lens::app::config::{self, Config};
use wonder_lens::app::i18n::fluent::I18n;
use wonder_lens::app::resolve_album;
use wonder_lens::catalog::builtin_album;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    assert_eq!(I18n::new(None, &loaded).current_locale().to_string(), "en-US");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("story-reveal"), "Révéler l'histoire");
}

#[test]
fn cli_language_beats_config() {
    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), &french);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
    assert_eq!(i18n.tr("story-reveal"), "Reveal Story");
}

#[test]
fn settings_round_trip_through_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Config::default();
    settings.slideshow.slide_duration_ms = Some(5_000);
    settings.music.start_track = Some(1);
    config::save_to_path(&settings, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.slide_duration().as_duration(), Duration::from_secs(5));
    assert_eq!(loaded.start_track(), 1);
}

#[test]
fn catalog_file_replaces_the_builtin_album() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("album.toml");
    fs::write(
        &path,
        r#"
[album]
title = "SUMMER"
subtitle = "2024"

[[media]]
id = "beach"
kind = "photo"
url = "https://example.com/beach.jpg"
title = "BEACH"
date = "JUL 2024"

[[media]]
id = "waves"
kind = "video"
url = "https://example.com/waves.mp4"
title = "WAVES"
date = "JUL 2024"
"#,
    )
    .expect("write catalog");

    let (album, warning) = resolve_album(Some(&path)).expect("album");
    assert!(warning.is_none());
    assert_eq!(album.title(), "SUMMER");
    assert_eq!(album.catalog().len(), 2);
    assert_eq!(
        album.tracks().len(),
        builtin_album().expect("builtin").tracks().len()
    );
}

#[test]
fn unreadable_catalog_falls_back_with_a_notice() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("album.toml");
    fs::write(&path, "[[media]]\nid = ").expect("write catalog");

    let (album, warning) = resolve_album(Some(&path)).expect("album");
    assert_eq!(warning, Some("notification-catalog-load-error"));
    assert_eq!(
        album.catalog().len(),
        builtin_album().expect("builtin").catalog().len()
    );

    let (_, warning) = resolve_album(Some(&dir.path().join("missing.toml"))).expect("album");
    assert_eq!(warning, Some("notification-catalog-load-error"));
}
