//! WiX manifest assembly and serialization.

pub mod assembler;
pub mod document;
pub mod group;
pub mod writer;

pub use assembler::{list_stable_ids, Assembly, IdKeys, ManifestAssembler, StableIdEntry};
pub use document::{Element, ManifestDocument};
pub use group::component_group;
pub use writer::{is_xml_char, to_xml_string, write_document};

/// WiX v3 schema namespace.
pub const WIX_NAMESPACE: &str = "http://schemas.microsoft.com/wix/2006/wi";

/// Wrap an assembled directory tree and its component group in the
/// `Wix` root: one fragment per part.
pub fn wix_document(directory_ref: Element, component_group: Element) -> ManifestDocument {
    ManifestDocument::new(
        Element::new("Wix")
            .with_attr("xmlns", WIX_NAMESPACE)
            .with_child(Element::new("Fragment").with_child(directory_ref))
            .with_child(Element::new("Fragment").with_child(component_group)),
    )
}
