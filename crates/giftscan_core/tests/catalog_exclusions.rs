use std::fs;

use giftscan_core::{
    CatalogError, ExclusionError, ExclusionSet, ExclusionSource, FileExclusionStore,
    ModelCatalog,
};
use tempfile::TempDir;

#[test]
fn catalog_loads_models_from_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("models.json");
    fs::write(&path, r#"{"PlushPepe": 2850, "capX": 100}"#).unwrap();

    let catalog = ModelCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.max_id("capX"), Some(100));
    assert_eq!(catalog.max_id("PlushPepe"), Some(2850));
    assert_eq!(catalog.max_id("plushpepe"), None);
    assert_eq!(catalog.max_id("nonexistent"), None);
}

#[test]
fn catalog_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = ModelCatalog::load(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn catalog_rejects_bad_entries() {
    assert!(matches!(
        ModelCatalog::from_json(r#"{"capX": -3}"#),
        Err(CatalogError::Parse(_))
    ));
    assert!(matches!(
        ModelCatalog::from_json(r#"["capX"]"#),
        Err(CatalogError::Parse(_))
    ));
    assert!(matches!(
        ModelCatalog::from_json(r#"{"capX": 0}"#),
        Err(CatalogError::InvalidMaxId { ref model, max_id: 0 }) if model == "capX"
    ));
}

#[test]
fn exclusions_are_trimmed_and_lowercased() {
    let set = ExclusionSet::new([" @Alice ", "@BOB", "   "]);
    assert_eq!(set.len(), 2);
    assert!(set.is_excluded("@alice"));
    assert!(set.is_excluded("@Alice"));
    assert!(set.is_excluded("@bob"));
    assert!(!set.is_excluded("@carol"));
}

#[test]
fn missing_exclusion_file_is_empty_set() {
    let temp = TempDir::new().unwrap();
    let store = FileExclusionStore::new(temp.path().join("excluded_owners.json"));
    let set = store.load().unwrap();
    assert!(set.is_empty());
}

#[test]
fn exclusion_file_is_reread_on_each_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("excluded_owners.json");
    let store = FileExclusionStore::new(&path);

    fs::write(&path, r#"["@alice"]"#).unwrap();
    assert!(store.load().unwrap().is_excluded("@ALICE"));

    fs::write(&path, r#"["@bob"]"#).unwrap();
    let set = store.load().unwrap();
    assert!(!set.is_excluded("@alice"));
    assert!(set.is_excluded("@bob"));
}

#[test]
fn corrupt_exclusion_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("excluded_owners.json");
    fs::write(&path, "{not json").unwrap();

    let err = FileExclusionStore::new(&path).load().unwrap_err();
    assert!(matches!(err, ExclusionError::Corrupt(_)));
}

#[test]
fn unreadable_exclusion_path_is_an_error() {
    let temp = TempDir::new().unwrap();
    // A directory cannot be read as a file.
    let err = FileExclusionStore::new(temp.path()).load().unwrap_err();
    assert!(matches!(err, ExclusionError::Io { .. }));
}
