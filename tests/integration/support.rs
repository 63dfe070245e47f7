use std::path::{Path, PathBuf};
use wixtree::harvest::HarvestRequest;
use wixtree::ident::FileIdMode;

pub const UPGRADE_CODE: &str = "{6C2F3A44-0B1E-4C55-9B61-4F0D3C7A2E10}";
pub const REGISTRY_KEY: &str = "HKCU\\Software\\Acme\\Tool";

/// Request for `relative` files under `base`, writing to `output`.
pub fn request(base: &Path, relative: &[&str], output: PathBuf) -> HarvestRequest {
    HarvestRequest {
        component_files: relative.iter().map(|r| base.join(r)).collect(),
        output_file: output,
        base_directory: base.to_path_buf(),
        directory_ref_id: "INSTALLDIR".to_string(),
        component_group_id: "ProductFiles".to_string(),
        registry_key: REGISTRY_KEY.to_string(),
        upgrade_code: UPGRADE_CODE.to_string(),
        file_ids: FileIdMode::Sequential,
    }
}

/// Values of every `attr="..."` occurrence on elements named `element`.
pub fn attr_values(xml: &str, element: &str, attr: &str) -> Vec<String> {
    let open = format!("<{} ", element);
    let needle = format!(" {}=\"", attr);
    xml.lines()
        .filter_map(|line| {
            let line = line.trim_start();
            if !line.starts_with(&open) {
                return None;
            }
            let start = line.find(&needle)? + needle.len();
            let end = line[start..].find('"')? + start;
            Some(line[start..end].to_string())
        })
        .collect()
}
