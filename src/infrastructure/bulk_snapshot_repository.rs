// Daily full-dump repository: one static JSON file per property pair
use crate::application::graph_repository::{FetchWindow, GraphRepository};
use crate::domain::error::{GraphError, Result};
use crate::domain::graph::SeriesCollection;
use crate::infrastructure::config::BulkSettings;
use crate::infrastructure::http_client::JsonHttpClient;
use crate::infrastructure::xy_payload::parse_snapshot;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Serves the dump regenerated at local midnight. Its timestamps are already
/// in the reporting timezone, so nothing is converted here.
#[derive(Debug, Clone)]
pub struct BulkSnapshotRepository {
    host: String,
    client: JsonHttpClient,
}

impl BulkSnapshotRepository {
    pub const NAME: &'static str = "bulk snapshot";

    pub fn new(settings: &BulkSettings) -> Result<Self> {
        Ok(Self {
            host: settings.host.trim_end_matches('/').to_string(),
            client: JsonHttpClient::new(Duration::from_secs(settings.timeout_secs))?,
        })
    }

    /// `{host}/{property_x}-{property_y}.json`, each property percent-encoded.
    pub fn snapshot_url(&self, property_x: &str, property_y: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}-{}.json",
            self.host,
            urlencoding::encode(property_x),
            urlencoding::encode(property_y)
        );
        Url::parse(&raw).map_err(|e| GraphError::Fetch {
            url: raw.clone(),
            reason: format!("invalid url: {}", e),
        })
    }
}

#[async_trait]
impl GraphRepository for BulkSnapshotRepository {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch_snapshot(&self, property_x: &str, property_y: &str) -> Result<SeriesCollection> {
        let url = self.snapshot_url(property_x, property_y)?;
        let body = self.client.get_json(url).await?;
        let series = parse_snapshot(body)?;

        tracing::debug!(
            "Fetched {} snapshot series for {} / {}",
            series.len(),
            property_x,
            property_y
        );
        Ok(SeriesCollection::new(series))
    }

    async fn fetch_incremental(
        &self,
        _property_x: &str,
        _property_y: &str,
        _unit_x: &str,
        _unit_y: &str,
        _window: Option<FetchWindow>,
    ) -> Result<SeriesCollection> {
        Err(GraphError::NotSupported {
            repository: Self::NAME,
            operation: "windowed query",
        })
    }
}
