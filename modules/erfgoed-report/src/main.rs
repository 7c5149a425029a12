use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use erfgoed_analysis::{resolve_exclusions, ReportPipeline, TypologyFilter};
use erfgoed_common::{load_config, Config, DiskCache};
use erfgoed_report::{logging, output};
use inventaris_client::InventarisClient;
use thesaurus_client::ThesaurusClient;

const DEFAULT_CONFIG: &str = "./erfgoed.toml";

#[derive(Parser)]
#[command(
    name = "erfgoed-report",
    about = "Export heritage objects with their protection status to CSV"
)]
struct Cli {
    /// Path to config TOML file
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Typology concept id to filter on
    #[arg(long)]
    concept: Option<u64>,

    /// Typology concept id to exclude (repeatable)
    #[arg(long = "not-concept")]
    not_concepts: Vec<u64>,

    /// Directory for the CSV report and log file
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Evaluation date for designation validity (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = if self.config == Path::new(DEFAULT_CONFIG) && !self.config.exists() {
            Config::default()
        } else {
            load_config(&self.config)?
        };

        if let Some(concept) = self.concept {
            config.query.concept = Some(concept);
        }
        if !self.not_concepts.is_empty() {
            config.query.not_concepts = self.not_concepts.clone();
        }
        if let Some(ref dir) = self.output_dir {
            config.output.dir = dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    std::fs::create_dir_all(&config.output.dir).with_context(|| {
        format!("Failed to create output dir {}", config.output.dir.display())
    })?;
    let timestamp = Local::now().format(output::TIMESTAMP_FORMAT).to_string();
    let log_path = config
        .output
        .log_to_file
        .then(|| config.output.dir.join(output::log_file_name(&timestamp)));
    logging::init(log_path.as_deref())?;

    let at = cli.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!(config = %cli.config.display(), %at, "Starting erfgoed-report");

    let detail_cache = DiskCache::open(
        config.cache.dir.join("erfgoedobjecten"),
        Duration::hours(config.cache.detail_ttl_hours),
    )?;
    let thesaurus_cache = DiskCache::open(
        config.cache.dir.join("erfgoedtypes"),
        Duration::hours(config.cache.thesaurus_ttl_hours),
    )?;
    let evicted = detail_cache.evict_expired().await? + thesaurus_cache.evict_expired().await?;
    if evicted > 0 {
        tracing::info!(evicted, "Evicted expired cache entries");
    }

    let thesaurus = ThesaurusClient::new(&config.thesaurus, thesaurus_cache)?;
    let inventory = InventarisClient::new(&config.inventaris, detail_cache)?;
    let filter = config.query_filter();

    let typology = match filter.concept {
        Some(id) => Some(
            TypologyFilter::resolve(&thesaurus, id)
                .await
                .with_context(|| format!("Failed to resolve typology concept {id}"))?,
        ),
        None => None,
    };
    resolve_exclusions(&thesaurus, &filter.not_concepts)
        .await
        .context("Failed to resolve excluded concepts")?;

    let mut pipeline = ReportPipeline::new(&inventory, at);
    if let Some(ref typology) = typology {
        pipeline = pipeline.with_typology(typology);
    }
    let report = pipeline.run(&filter).await.context("Report run failed")?;

    let csv_path = config.output.dir.join(output::report_file_name(
        typology.as_ref().map(|t| t.concept()),
        &timestamp,
    ));
    output::write_csv(&csv_path, &report.rows)?;
    tracing::info!(path = %csv_path.display(), rows = report.rows.len(), "Wrote report");

    println!("{}: {}", csv_path.display(), report.stats);
    Ok(())
}
