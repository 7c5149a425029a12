use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ErfgoedError, Result};

/// TOML-backed run configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub query: QueryConfig,
    pub inventaris: InventarisConfig,
    pub thesaurus: ThesaurusConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Which erfgoedobjecten to ask the inventory for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct QueryConfig {
    /// Discipline codes; empty means every discipline.
    pub disciplines: Vec<u32>,
    /// `None` queries regardless of heritage value.
    pub erfgoedwaarde: Option<bool>,
    /// Legal-effect filter, e.g. `beschermd`.
    pub rechtsgevolgen: Option<String>,
    /// Typology concept; `None` is an unfiltered run.
    pub concept: Option<u64>,
    pub not_concepts: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InventarisConfig {
    pub base_url: String,
    /// Host used in record URIs, swapped for the inventory host to build self links.
    pub id_host: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for InventarisConfig {
    fn default() -> Self {
        Self {
            base_url: "https://inventaris.onroerenderfgoed.be".to_string(),
            id_host: "id.erfgoed.net".to_string(),
            timeout_secs: 10,
            max_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThesaurusConfig {
    pub base_url: String,
    pub scheme_id: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for ThesaurusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://thesaurus.onroerenderfgoed.be".to_string(),
            scheme_id: "ERFGOEDTYPES".to_string(),
            language: "nl-BE".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub detail_ttl_hours: i64,
    pub thesaurus_ttl_hours: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./cache"),
            detail_ttl_hours: 24,
            thesaurus_ttl_hours: 24 * 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub log_to_file: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            log_to_file: true,
        }
    }
}

/// Filter criteria sent to the `erfgoedobjecten` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilter {
    pub disciplines: Vec<u32>,
    pub erfgoedwaarde: Option<bool>,
    pub rechtsgevolgen: Option<String>,
    pub concept: Option<u64>,
    pub not_concepts: Vec<u64>,
}

impl QueryFilter {
    /// Query-string pairs. Excluded concepts are sent as negated ids.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for discipline in &self.disciplines {
            pairs.push(("discipline", discipline.to_string()));
        }
        if let Some(erfgoedwaarde) = self.erfgoedwaarde {
            pairs.push(("erfgoedwaarde", erfgoedwaarde.to_string()));
        }
        if let Some(concept) = self.concept {
            pairs.push(("typologie", concept.to_string()));
            for excluded in &self.not_concepts {
                pairs.push(("typologie", format!("-{excluded}")));
            }
        }
        if let Some(ref rechtsgevolgen) = self.rechtsgevolgen {
            pairs.push(("rechtsgevolgen", rechtsgevolgen.clone()));
        }
        pairs
    }
}

impl Config {
    pub fn query_filter(&self) -> QueryFilter {
        QueryFilter {
            disciplines: self.query.disciplines.clone(),
            erfgoedwaarde: self.query.erfgoedwaarde,
            rechtsgevolgen: self.query.rechtsgevolgen.clone(),
            concept: self.query.concept,
            not_concepts: self.query.not_concepts.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.concept.is_none() && !self.query.not_concepts.is_empty() {
            return Err(ErfgoedError::Config(
                "query.not_concepts requires query.concept".to_string(),
            ));
        }
        if self.cache.detail_ttl_hours <= 0 || self.cache.thesaurus_ttl_hours <= 0 {
            return Err(ErfgoedError::Config(
                "cache TTLs must be positive".to_string(),
            ));
        }
        if self.inventaris.max_attempts == 0 {
            return Err(ErfgoedError::Config(
                "inventaris.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ErfgoedError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    toml::from_str(&content).map_err(|e| {
        ErfgoedError::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}
