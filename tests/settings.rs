use std::fs;

use webshop_client::domain::sort::{SortDirection, SortField, SortSpec};
use webshop_client::settings::{JsonFileSettings, ListingSettings, SettingsStore};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileSettings::new(dir.path().join("settings.json"));

    assert!(store.load().unwrap().is_none());

    let settings = ListingSettings {
        order_by: SortSpec::new(SortField::Price, SortDirection::Desc),
        offset: 12,
        limit: 6,
    };
    store.save(&settings).unwrap();

    assert_eq!(store.load().unwrap(), Some(settings));
}

#[test]
fn test_file_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileSettings::new(dir.path().join("state/webshop/settings.json"));

    store.save(&ListingSettings::default()).unwrap();

    assert_eq!(store.load().unwrap(), Some(ListingSettings::default()));
}

#[test]
fn test_corrupt_file_reads_as_nothing_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{not json").unwrap();

    let store = JsonFileSettings::new(path);

    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"orderBy":"price.DESC"}"#).unwrap();

    let store = JsonFileSettings::new(path);
    let settings = store.load().unwrap().unwrap();

    assert_eq!(
        settings.order_by,
        SortSpec::new(SortField::Price, SortDirection::Desc)
    );
    assert_eq!(settings.offset, 0);
    assert_eq!(settings.limit, 6);
}

#[test]
fn test_zero_limit_normalizes_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"orderBy":"name.ASC","offset":6,"limit":0}"#).unwrap();

    let store = JsonFileSettings::new(path);

    assert_eq!(store.load().unwrap().unwrap().limit, 6);
}
