//! Component group emission.

use crate::error::HarvestError;
use crate::manifest::document::Element;
use crate::types::ComponentRecord;

/// Build a `ComponentGroup` with one `ComponentRef` per record, in record
/// order.
///
/// With `require_components` set, an empty record list is an error rather
/// than an empty group.
pub fn component_group(
    group_id: &str,
    components: &[ComponentRecord],
    require_components: bool,
) -> Result<Element, HarvestError> {
    if require_components && components.is_empty() {
        return Err(HarvestError::EmptyComponentGroup(group_id.to_string()));
    }

    let mut group = Element::new("ComponentGroup").with_attr("Id", group_id);
    for component in components {
        group.push(Element::new("ComponentRef").with_attr("Id", component.id.as_str()));
    }
    Ok(group)
}
