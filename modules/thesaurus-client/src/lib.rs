pub mod error;
pub mod types;

pub use error::{Result, ThesaurusError};
pub use types::RawConcept;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use erfgoed_common::config::ThesaurusConfig;
use erfgoed_common::{Concept, ConceptResolver, DiskCache, ErfgoedError};

/// Client for one concept scheme of an Atramhasis thesaurus.
pub struct ThesaurusClient {
    client: reqwest::Client,
    base_url: String,
    scheme_id: String,
    language: String,
    cache: DiskCache,
}

impl ThesaurusClient {
    pub fn new(config: &ThesaurusConfig, cache: DiskCache) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            scheme_id: config.scheme_id.clone(),
            language: config.language.clone(),
            cache,
        })
    }

    fn concept_url(&self, id: u64) -> String {
        format!(
            "{}/conceptschemes/{}/c/{}",
            self.base_url, self.scheme_id, id
        )
    }

    pub async fn concept(&self, id: u64) -> Result<Concept> {
        let url = self.concept_url(id);
        let raw: Option<RawConcept> = self
            .cache
            .get_or_insert_with(&url, || self.get_json(&url))
            .await?;
        let raw = raw.ok_or(ThesaurusError::NotFound(id))?;

        Ok(Concept {
            id: raw.id,
            label: raw.preferred_label(&self.language),
            uri: raw.uri,
        })
    }

    /// Ids of the concept and everything below it.
    pub async fn expand(&self, id: u64) -> Result<Vec<u64>> {
        let url = format!("{}/expand", self.concept_url(id));
        let ids: Option<Vec<u64>> = self
            .cache
            .get_or_insert_with(&url, || self.get_json(&url))
            .await?;
        let ids = ids.ok_or(ThesaurusError::NotFound(id))?;
        tracing::debug!(id, expanded = ids.len(), "Expanded concept");
        Ok(ids)
    }

    /// GET a JSON document; 404 is `None`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::info!(url, "Querying thesaurus");
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ThesaurusError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    fn resolver_error(&self, id: u64, err: ThesaurusError) -> ErfgoedError {
        match err {
            ThesaurusError::NotFound(_) => ErfgoedError::UnresolvableConcept(id),
            ThesaurusError::Cache(message) => ErfgoedError::Cache(message),
            other => ErfgoedError::Fetch {
                url: self.concept_url(id),
                message: other.to_string(),
                fatal: true,
            },
        }
    }
}

#[async_trait]
impl ConceptResolver for ThesaurusClient {
    async fn resolve_by_id(&self, id: u64) -> erfgoed_common::Result<Concept> {
        self.concept(id)
            .await
            .map_err(|e| self.resolver_error(id, e))
    }

    async fn expand_descendants(&self, id: u64) -> erfgoed_common::Result<Vec<u64>> {
        self.expand(id)
            .await
            .map_err(|e| self.resolver_error(id, e))
    }
}
