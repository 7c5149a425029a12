// Collaborator seams for the report pipeline.
//
// InventorySource: listing and detail fetches against the inventory API.
// ConceptResolver: thesaurus lookups for typology expansion.
//
// The HTTP clients implement these; tests use HashMap-backed mocks.

use async_trait::async_trait;

use crate::config::QueryFilter;
use crate::error::Result;
use crate::records::{DetailRecord, SummaryRecord};
use crate::types::Concept;

#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Every summary record matching the filter, across all pages.
    async fn fetch_list(&self, filter: &QueryFilter) -> Result<Vec<SummaryRecord>>;

    /// The detail record behind a self link. `None` when the record is gone (404).
    async fn fetch_detail(&self, url: &str) -> Result<Option<DetailRecord>>;
}

#[async_trait]
pub trait ConceptResolver: Send + Sync {
    /// Look up a concept. Unknown ids are `ErfgoedError::UnresolvableConcept`.
    async fn resolve_by_id(&self, id: u64) -> Result<Concept>;

    /// Ids of all concepts below `id` in the hierarchy.
    async fn expand_descendants(&self, id: u64) -> Result<Vec<u64>>;
}
