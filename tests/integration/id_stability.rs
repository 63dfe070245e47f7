use crate::integration::support::{attr_values, request, REGISTRY_KEY, UPGRADE_CODE};
use std::collections::HashSet;
use std::fs;
use wixtree::ident::SequentialIds;
use wixtree::manifest::to_xml_string;
use wixtree::{IdKind, StableId};

fn compile(base: &std::path::Path, files: &[&str]) -> String {
    let req = request(base, files, base.join("unused.wxs"));
    let compiled = req.compile(&mut SequentialIds::default()).unwrap();
    to_xml_string(&compiled.document)
}

fn stable_ids(xml: &str) -> HashSet<String> {
    attr_values(xml, "Directory", "Id")
        .into_iter()
        .chain(attr_values(xml, "Component", "Id"))
        .collect()
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let first_out = temp.path().join("first.wxs");
    let second_out = temp.path().join("second.wxs");
    let files = ["bin/app.exe", "bin/app.dll", "doc/readme.txt", "license.txt"];

    request(&base, &files, first_out.clone()).run().unwrap();
    request(&base, &files, second_out.clone()).run().unwrap();

    assert_eq!(
        fs::read(&first_out).unwrap(),
        fs::read(&second_out).unwrap()
    );
}

#[test]
fn ids_survive_unrelated_additions() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");

    let before = stable_ids(&compile(&base, &["bin/app.exe", "doc/readme.txt"]));
    let after = stable_ids(&compile(
        &base,
        &["bin/app.exe", "doc/readme.txt", "plugins/extra.dll", "bin/new.dll"],
    ));
    assert!(before.is_subset(&after));
}

#[test]
fn renaming_a_directory_changes_only_its_ids() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");

    let before = compile(&base, &["a/b/x.txt", "s/y.txt"]);
    let after = compile(&base, &["a/c/x.txt", "s/y.txt"]);

    let dir_b = StableId::derive(UPGRADE_CODE, REGISTRY_KEY, IdKind::Directory, "/a/b").element_id();
    let cmp_b = StableId::derive(UPGRADE_CODE, REGISTRY_KEY, IdKind::Component, "/a/b").element_id();
    let dir_s = StableId::derive(UPGRADE_CODE, REGISTRY_KEY, IdKind::Directory, "/s").element_id();
    let cmp_s = StableId::derive(UPGRADE_CODE, REGISTRY_KEY, IdKind::Component, "/s").element_id();

    assert!(before.contains(&dir_b) && before.contains(&cmp_b));
    assert!(!after.contains(&dir_b) && !after.contains(&cmp_b));
    for unchanged in [&dir_s, &cmp_s] {
        assert!(before.contains(unchanged.as_str()));
        assert!(after.contains(unchanged.as_str()));
    }
}

#[test]
fn changing_keys_changes_every_stable_id() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let files = ["a/1.txt", "b/c/2.txt", "top.txt"];

    let baseline = {
        let req = request(&base, &files, base.join("x.wxs"));
        to_xml_string(&req.compile(&mut SequentialIds::default()).unwrap().document)
    };
    let upgraded = {
        let mut req = request(&base, &files, base.join("x.wxs"));
        req.upgrade_code = "{00000000-0000-0000-0000-000000000001}".to_string();
        to_xml_string(&req.compile(&mut SequentialIds::default()).unwrap().document)
    };
    let moved_key = {
        let mut req = request(&base, &files, base.join("x.wxs"));
        req.registry_key = "HKLM\\Software\\Acme\\Tool".to_string();
        to_xml_string(&req.compile(&mut SequentialIds::default()).unwrap().document)
    };

    let ids = stable_ids(&baseline);
    assert!(!ids.is_empty());
    assert!(ids.is_disjoint(&stable_ids(&upgraded)));
    assert!(ids.is_disjoint(&stable_ids(&moved_key)));
}

#[test]
fn changing_literal_ids_changes_only_those_ids() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("pkg");
    let files = ["a/1.txt", "b/2.txt"];

    let baseline = compile(&base, &files);
    let renamed = {
        let mut req = request(&base, &files, base.join("x.wxs"));
        req.directory_ref_id = "APPDIR".to_string();
        req.component_group_id = "AppFiles".to_string();
        to_xml_string(&req.compile(&mut SequentialIds::default()).unwrap().document)
    };

    assert_eq!(stable_ids(&baseline), stable_ids(&renamed));
    assert_eq!(attr_values(&renamed, "DirectoryRef", "Id"), vec!["APPDIR"]);
    assert_eq!(attr_values(&renamed, "ComponentGroup", "Id"), vec!["AppFiles"]);
    assert_eq!(
        baseline
            .replace("INSTALLDIR", "APPDIR")
            .replace("ProductFiles", "AppFiles"),
        renamed
    );
}
