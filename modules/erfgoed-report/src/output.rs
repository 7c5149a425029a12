//! CSV report and log file naming/writing.

use std::path::Path;

use anyhow::{Context, Result};

use erfgoed_analysis::{ExportRow, COLUMNS};
use erfgoed_common::Concept;

/// Timestamp format shared by the report and its log file.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `query_<id>_<label>_<timestamp>.csv`, or `query_<timestamp>.csv` for an unfiltered run.
pub fn report_file_name(concept: Option<&Concept>, timestamp: &str) -> String {
    match concept {
        Some(concept) => format!(
            "query_{}_{}_{timestamp}.csv",
            concept.id,
            file_safe(&concept.label)
        ),
        None => format!("query_{timestamp}.csv"),
    }
}

pub fn log_file_name(timestamp: &str) -> String {
    format!("query_{timestamp}.log")
}

fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Write the report. The header is always written, also for an empty batch.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        let concept = Concept {
            id: 53,
            uri: "https://id.erfgoed.net/thesauri/erfgoedtypes/53".into(),
            label: "begijnhoven en hofjes".into(),
        };
        assert_eq!(
            report_file_name(Some(&concept), "20240601_120000"),
            "query_53_begijnhoven_en_hofjes_20240601_120000.csv"
        );
        assert_eq!(
            report_file_name(None, "20240601_120000"),
            "query_20240601_120000.csv"
        );
        assert_eq!(log_file_name("20240601_120000"), "query_20240601_120000.log");
    }

    #[test]
    fn label_cannot_escape_the_output_dir() {
        assert_eq!(file_safe("a/b\\c"), "a_b_c");
    }
}
