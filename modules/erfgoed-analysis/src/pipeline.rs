//! One report run: list, fetch details, analyse every object, clean the batch.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use erfgoed_common::{
    ErfgoedError, HeritageObject, InventorySource, QueryFilter, Result, SummaryRecord,
};

use crate::cleaner::clean_relations;
use crate::export::{ExportRow, ReportEntry};
use crate::typology::TypologyFilter;

/// Outcome counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub listed: usize,
    pub exported: usize,
    /// Detail record gone (404).
    pub missing: usize,
    /// Relation or term that could not be converted.
    pub malformed: usize,
    /// Any other non-fatal fetch failure.
    pub failed: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} listed, {} exported, {} missing, {} malformed, {} failed",
            self.listed, self.exported, self.missing, self.malformed, self.failed
        )
    }
}

#[derive(Debug)]
pub struct Report {
    pub rows: Vec<ExportRow>,
    pub stats: RunStats,
}

pub struct ReportPipeline<'a> {
    inventory: &'a dyn InventorySource,
    typology: Option<&'a TypologyFilter>,
    at: NaiveDate,
}

impl<'a> ReportPipeline<'a> {
    pub fn new(inventory: &'a dyn InventorySource, at: NaiveDate) -> Self {
        Self {
            inventory,
            typology: None,
            at,
        }
    }

    pub fn with_typology(mut self, typology: &'a TypologyFilter) -> Self {
        self.typology = Some(typology);
        self
    }

    /// Sequential: one detail fetch at a time, batch cleanup once at the end.
    pub async fn run(&self, filter: &QueryFilter) -> Result<Report> {
        let summaries = self.inventory.fetch_list(filter).await?;
        let mut stats = RunStats {
            listed: summaries.len(),
            ..RunStats::default()
        };
        tracing::info!(count = summaries.len(), "Fetched erfgoedobjecten");

        let mut entries = Vec::with_capacity(summaries.len());
        for (index, summary) in summaries.into_iter().enumerate() {
            let uri = summary.uri.clone();
            tracing::debug!(index, uri = uri.as_str(), "Processing erfgoedobject");

            match self.build_object(summary).await {
                Ok(object) => entries.push(ReportEntry::analyse(object, self.at, self.typology)),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(uri = uri.as_str(), error = %e, "Skipping erfgoedobject");
                    match e {
                        ErfgoedError::MissingDetail(_) => stats.missing += 1,
                        ErfgoedError::MalformedRelation { .. } => stats.malformed += 1,
                        _ => stats.failed += 1,
                    }
                }
            }
        }

        let rows = clean_relations(entries);
        stats.exported = rows.len();
        tracing::info!(%stats, "Report ready");
        Ok(Report { rows, stats })
    }

    async fn build_object(&self, summary: SummaryRecord) -> Result<HeritageObject> {
        let detail = self
            .inventory
            .fetch_detail(&summary.self_link)
            .await?
            .ok_or_else(|| ErfgoedError::MissingDetail(summary.self_link.clone()))?;
        HeritageObject::from_records(summary, detail)
    }
}
