use crate::integration::support::request;
use proptest::prelude::*;
use std::fs;
use wixtree::ident::RandomIds;

const FILES: &[&str] = &[
    "bin/app.exe",
    "bin/app.dll",
    "bin/plugins/a.dll",
    "bin/plugins/b.dll",
    "doc/guide/intro.html",
    "doc/readme.txt",
    "license.txt",
    "share/icons/app.ico",
];

proptest! {
    #[test]
    fn component_ids_ignore_input_order(order in Just(FILES.to_vec()).prop_shuffle()) {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("pkg");

        let canonical = request(&base, FILES, base.join("x.wxs"))
            .compile(&mut RandomIds)
            .unwrap();
        let shuffled = request(&base, &order, base.join("x.wxs"))
            .compile(&mut RandomIds)
            .unwrap();

        prop_assert_eq!(canonical.components, shuffled.components);
        prop_assert_eq!(
            request(&base, FILES, base.join("x.wxs")).stable_ids().unwrap(),
            request(&base, &order, base.join("x.wxs")).stable_ids().unwrap()
        );
    }

    #[test]
    fn sequential_documents_ignore_input_order(order in Just(FILES.to_vec()).prop_shuffle()) {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("pkg");
        let first = temp.path().join("canonical.wxs");
        let second = temp.path().join("shuffled.wxs");

        request(&base, FILES, first.clone()).run().unwrap();
        request(&base, &order, second.clone()).run().unwrap();

        prop_assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
