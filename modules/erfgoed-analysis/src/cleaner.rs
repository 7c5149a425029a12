use std::collections::HashSet;

use erfgoed_common::short_id;

use crate::export::{ExportRow, ReportEntry};

/// Turn a finished batch into export rows, keeping only containment links to
/// objects that are part of the same batch.
///
/// Links are rendered as short ids joined with `", "`, in relation order.
/// Membership is a hash lookup, so the cost grows with the total number of
/// links rather than batch size squared.
pub fn clean_relations(entries: Vec<ReportEntry>) -> Vec<ExportRow> {
    let in_batch: HashSet<String> = entries.iter().map(|e| e.object.uri.clone()).collect();

    let keep = |uris: &[String]| -> String {
        uris.iter()
            .filter(|uri| in_batch.contains(uri.as_str()))
            .map(|uri| short_id(uri))
            .collect::<Vec<_>>()
            .join(", ")
    };

    entries
        .into_iter()
        .map(|entry| {
            let contains = keep(&entry.links.contains);
            let part_of = keep(&entry.links.part_of);
            entry.into_row(contains, part_of)
        })
        .collect()
}
