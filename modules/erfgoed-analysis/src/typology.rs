//! Typology matching: which kenmerkgroepen carry the queried concept (or one
//! of its descendants) as typology term.

use std::collections::HashSet;

use erfgoed_common::{
    AttributeGroup, Concept, ConceptResolver, HeritageObject, Result, ThesaurusTerm,
    KENMERK_TYPOLOGY,
};

/// A concept expanded to the URIs of itself and all its descendants.
/// Built once per run; the per-object matching never touches the thesaurus.
#[derive(Debug, Clone, PartialEq)]
pub struct TypologyFilter {
    concept: Concept,
    expanded_uris: HashSet<String>,
}

impl TypologyFilter {
    pub async fn resolve(resolver: &dyn ConceptResolver, concept_id: u64) -> Result<Self> {
        let concept = resolver.resolve_by_id(concept_id).await?;

        let mut expanded_uris = HashSet::from([concept.uri.clone()]);
        let mut seen = HashSet::from([concept.id]);
        for id in resolver.expand_descendants(concept.id).await? {
            if !seen.insert(id) {
                continue;
            }
            let descendant = resolver.resolve_by_id(id).await?;
            expanded_uris.insert(descendant.uri);
        }

        tracing::info!(
            concept = %concept,
            expanded = expanded_uris.len(),
            "Typology filter ready"
        );
        Ok(Self {
            concept,
            expanded_uris,
        })
    }

    pub fn new(concept: Concept, expanded_uris: impl IntoIterator<Item = String>) -> Self {
        let mut expanded_uris: HashSet<String> = expanded_uris.into_iter().collect();
        expanded_uris.insert(concept.uri.clone());
        Self {
            concept,
            expanded_uris,
        }
    }

    pub fn concept(&self) -> &Concept {
        &self.concept
    }

    pub fn expanded_uris(&self) -> &HashSet<String> {
        &self.expanded_uris
    }

    pub fn matches(&self, term: &ThesaurusTerm) -> bool {
        term.kenmerk_id == KENMERK_TYPOLOGY && self.expanded_uris.contains(&term.uri)
    }
}

/// Resolve the concepts excluded from the listing. Any unknown id fails the run.
pub async fn resolve_exclusions(
    resolver: &dyn ConceptResolver,
    ids: &[u64],
) -> Result<Vec<Concept>> {
    let mut excluded = Vec::with_capacity(ids.len());
    for id in ids {
        let concept = resolver.resolve_by_id(*id).await?;
        tracing::info!(concept = %concept, "Excluding concept");
        excluded.push(concept);
    }
    Ok(excluded)
}

/// Fold the "alle kenmerkgroepen" group into every other group.
///
/// Returns a new list: the terms of the first group flagged `applies_to_all`
/// are appended to each other group, and the flagged group itself is left out.
pub fn normalize_groups(groups: &[AttributeGroup]) -> Vec<AttributeGroup> {
    let Some(shared_index) = groups.iter().position(|g| g.applies_to_all) else {
        return groups.to_vec();
    };
    let shared = &groups[shared_index].terms;

    groups
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != shared_index)
        .map(|(_, group)| {
            let mut merged = group.clone();
            merged.terms.extend(shared.iter().cloned());
            merged
        })
        .collect()
}

/// The object's primary kenmerkgroepen for `filter`; empty for unfiltered runs.
pub fn match_primary_groups(
    object: &HeritageObject,
    filter: Option<&TypologyFilter>,
) -> Vec<AttributeGroup> {
    let Some(filter) = filter else {
        return Vec::new();
    };

    normalize_groups(&object.attribute_groups)
        .into_iter()
        .filter(|group| group.terms.iter().any(|t| filter.matches(t)))
        .collect()
}

/// `"a | b, c"`: groups joined by `", "`, each group's term labels by `" | "`.
pub fn render_primary_groups(groups: &[AttributeGroup]) -> String {
    groups
        .iter()
        .map(|g| {
            g.terms
                .iter()
                .map(|t| t.label.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct labels of one kenmerk dimension over all groups, first occurrence first.
pub fn distinct_labels(groups: &[AttributeGroup], kenmerk_id: u32) -> Vec<String> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|g| g.terms.iter())
        .filter(|t| t.kenmerk_id == kenmerk_id)
        .filter(|t| seen.insert(t.label.as_str()))
        .map(|t| t.label.clone())
        .collect()
}
