pub mod cleaner;
pub mod containment;
pub mod designations;
pub mod export;
pub mod pipeline;
pub mod typology;
pub mod validity;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use cleaner::clean_relations;
pub use containment::{extract_links, ContainmentLinks};
pub use designations::{classify, ProtectionSummary};
pub use export::{ExportRow, ReportEntry, TermSummary, COLUMNS};
pub use pipeline::{Report, ReportPipeline, RunStats};
pub use typology::{
    distinct_labels, match_primary_groups, normalize_groups, render_primary_groups,
    resolve_exclusions, TypologyFilter,
};
pub use validity::is_valid;
