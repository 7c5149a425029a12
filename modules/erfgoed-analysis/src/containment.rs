use serde::{Deserialize, Serialize};

use erfgoed_common::{HeritageObject, HERITAGE_OBJECT_KIND, RELATION_CONTAINS, RELATION_PART_OF};

/// Raw "omvat" / "deel van" URIs, not yet checked against the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainmentLinks {
    pub contains: Vec<String>,
    pub part_of: Vec<String>,
}

/// Containment links of an object, in relation order. No validity filter:
/// containment is taken as always current.
pub fn extract_links(object: &HeritageObject) -> ContainmentLinks {
    let mut links = ContainmentLinks::default();
    for relation in object
        .relations
        .iter()
        .filter(|r| r.related_kind == HERITAGE_OBJECT_KIND)
    {
        match relation.relation_type {
            Some(RELATION_CONTAINS) => links.contains.push(relation.uri.clone()),
            Some(RELATION_PART_OF) => links.part_of.push(relation.uri.clone()),
            _ => {}
        }
    }
    links
}
