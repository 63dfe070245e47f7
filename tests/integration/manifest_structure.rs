use crate::integration::support::{attr_values, request};
use std::fs;
use wixtree::HarvestError;

#[test]
fn groups_files_by_directory_and_references_each_component() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    let summary = request(&base, &["a/1.txt", "a/2.txt", "b/3.txt"], output.clone())
        .run()
        .unwrap();
    assert_eq!(summary.components.len(), 2);
    assert_eq!(summary.files, 3);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
    assert_eq!(attr_values(&xml, "Directory", "Name"), vec!["a", "b"]);
    assert_eq!(attr_values(&xml, "Component", "Id"), summary.components);
    assert_eq!(attr_values(&xml, "ComponentRef", "Id"), summary.components);
    assert_eq!(attr_values(&xml, "File", "Source").len(), 3);
    assert_eq!(xml.matches("<CreateFolder />").count(), 2);
    assert_eq!(xml.matches("<RegistryKey ").count(), 2);
}

#[test]
fn intermediate_directory_is_kept_without_component() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    let summary = request(&base, &["a/b/x.txt"], output.clone()).run().unwrap();
    assert_eq!(summary.components.len(), 1);
    assert_eq!(summary.directories, 2);

    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(attr_values(&xml, "Directory", "Name"), vec!["a", "b"]);
    assert_eq!(attr_values(&xml, "Component", "Id").len(), 1);
}

#[test]
fn files_at_base_get_component_without_folder_markers() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    request(&base, &["readme.txt"], output.clone()).run().unwrap();
    let xml = fs::read_to_string(&output).unwrap();
    assert!(attr_values(&xml, "Directory", "Name").is_empty());
    assert_eq!(attr_values(&xml, "Component", "Id").len(), 1);
    assert!(!xml.contains("<CreateFolder />"));
    assert!(!xml.contains("<RemoveFolder "));
}

#[test]
fn containment_error_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    let mut req = request(&base, &["a/1.txt"], output.clone());
    req.component_files.push(temp.path().join("other").join("x.txt"));

    let err = req.run().unwrap_err();
    assert!(matches!(err, HarvestError::Containment { .. }));
    assert!(!output.exists());
}

#[test]
fn conflicting_entries_write_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    let err = request(&base, &["a", "a/1.txt"], output.clone())
        .run()
        .unwrap_err();
    assert!(matches!(err, HarvestError::StructuralConflict { .. }));
    assert!(!output.exists());
}

#[test]
fn malformed_registry_key_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    let mut req = request(&base, &["a/1.txt"], output.clone());
    req.registry_key = "HKCU".to_string();
    assert!(matches!(
        req.run().unwrap_err(),
        HarvestError::InvalidRegistryKey(_)
    ));
    assert!(!output.exists());
}

#[test]
fn special_characters_are_escaped() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let output = temp.path().join("files.wxs");

    request(&base, &["R&D/notes <draft>.txt"], output.clone())
        .run()
        .unwrap();
    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("Name=\"R&amp;D\""));
    assert!(xml.contains("notes &lt;draft&gt;.txt"));
}
