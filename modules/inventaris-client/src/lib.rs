pub mod error;
pub mod paging;

pub use error::{InventarisError, Result};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response, StatusCode};

use erfgoed_common::config::InventarisConfig;
use erfgoed_common::{DetailRecord, DiskCache, InventorySource, QueryFilter, SummaryRecord};

pub struct InventarisClient {
    client: reqwest::Client,
    base_url: String,
    id_host: String,
    max_attempts: u32,
    cache: DiskCache,
}

impl InventarisClient {
    pub fn new(config: &InventarisConfig, cache: DiskCache) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            id_host: config.id_host.clone(),
            max_attempts: config.max_attempts.max(1),
            cache,
        })
    }

    /// Fetch every erfgoedobject matching `filter`, following `next` links.
    pub async fn erfgoedobjecten(&self, filter: &QueryFilter) -> Result<Vec<SummaryRecord>> {
        let url = format!("{}/erfgoedobjecten", self.base_url);
        let pairs = filter.to_query_pairs();
        tracing::info!(url = %url, query = ?pairs, "Querying inventory");

        let resp = self.get_page(self.client.get(&url).query(&pairs)).await?;
        let total = paging::content_range_total(resp.headers());
        tracing::info!(total, "Inventory result count");
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut next = paging::next_link(resp.headers());
        let mut records: Vec<SummaryRecord> = parse_body(resp).await?;

        while let Some(page_url) = next {
            tracing::info!(url = %page_url, "Fetching next page");
            let resp = self.get_page(self.client.get(&page_url)).await?;
            next = paging::next_link(resp.headers());
            records.extend(parse_body::<Vec<SummaryRecord>>(resp).await?);
        }

        for record in &mut records {
            record.self_link = self.self_link_for(&record.uri, &record.self_link);
        }

        tracing::info!(count = records.len(), "Fetched inventory listing");
        Ok(records)
    }

    /// Fetch a detail record through the disk cache. `None` means 404.
    pub async fn erfgoedobject(&self, url: &str) -> Result<Option<DetailRecord>> {
        self.cache
            .get_or_insert_with(url, || self.get_with_retry(url))
            .await
    }

    /// The listing's `self` links are not always usable; derive them from the URI.
    fn self_link_for(&self, uri: &str, fallback: &str) -> String {
        match uri.split_once(self.id_host.as_str()) {
            Some((_, path)) if !self.id_host.is_empty() => format!("{}{}", self.base_url, path),
            _ if !fallback.is_empty() => fallback.to_string(),
            _ => uri.to_string(),
        }
    }

    async fn get_page(&self, request: RequestBuilder) -> Result<Response> {
        let resp = request.header(ACCEPT, "application/json").send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(InventarisError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    /// GET with up to `max_attempts` tries. Connection errors, timeouts and
    /// non-404 error statuses are retried; 404 is an answer, not a failure.
    async fn get_with_retry(&self, url: &str) -> Result<Option<DetailRecord>> {
        tracing::info!(url, "Fetching detail record");

        for attempt in 1..=self.max_attempts {
            match self
                .client
                .get(url)
                .header(ACCEPT, "application/json")
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    return Ok(Some(parse_body(resp).await?));
                }
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                    let body = resp.text().await.unwrap_or_default();
                    tracing::warn!(url, status = 404, body = %body, "Record not found");
                    return Ok(None);
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body = resp.text().await.unwrap_or_default();
                    tracing::error!(url, attempt, status, body = %body, "Problem fetching record");
                }
                Err(e) => {
                    tracing::error!(url, attempt, error = %e, "Problem fetching record");
                }
            }
        }

        Err(InventarisError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.max_attempts,
        })
    }
}

async fn parse_body<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl InventorySource for InventarisClient {
    async fn fetch_list(&self, filter: &QueryFilter) -> erfgoed_common::Result<Vec<SummaryRecord>> {
        // Listing failures are always fatal.
        self.erfgoedobjecten(filter)
            .await
            .map_err(|e| erfgoed_common::ErfgoedError::Fetch {
                url: format!("{}/erfgoedobjecten", self.base_url),
                message: e.to_string(),
                fatal: true,
            })
    }

    async fn fetch_detail(&self, url: &str) -> erfgoed_common::Result<Option<DetailRecord>> {
        self.erfgoedobject(url)
            .await
            .map_err(|e| e.into_fetch_error(url))
    }
}
