// Live windowed-query repository
use crate::application::graph_repository::{FetchWindow, GraphRepository};
use crate::domain::error::Result;
use crate::domain::graph::SeriesCollection;
use crate::infrastructure::config::LiveSettings;
use crate::infrastructure::http_client::JsonHttpClient;
use crate::infrastructure::xy_payload::parse_live;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};
use reqwest::Url;
use std::time::Duration;

/// Answers date-window queries but cannot produce a complete dump; it must be
/// paired with the snapshot source. Timestamps come back in UTC and are
/// re-expressed in the reporting offset.
#[derive(Debug, Clone)]
pub struct LiveIncrementalRepository {
    host: String,
    limit: u32,
    offset: FixedOffset,
    client: JsonHttpClient,
}

impl LiveIncrementalRepository {
    pub const NAME: &'static str = "live incremental";

    pub fn new(settings: &LiveSettings, offset: FixedOffset) -> Result<Self> {
        Ok(Self {
            host: settings.host.trim_end_matches('/').to_string(),
            limit: settings.limit,
            offset,
            client: JsonHttpClient::new(Duration::from_secs(settings.timeout_secs))?,
        })
    }

    /// From local midnight of the day before `now` up to `now`. The snapshot is
    /// cut at local midnight, so this covers everything it may be missing.
    pub fn default_window(now: DateTime<Utc>, offset: FixedOffset) -> FetchWindow {
        let local_now = now.with_timezone(&offset);
        let since_midnight = local_now.time() - NaiveTime::MIN;
        let from = local_now - since_midnight - TimeDelta::days(1);
        FetchWindow::new(from, local_now)
    }

    pub fn query_url(
        &self,
        property_x: &str,
        property_y: &str,
        unit_x: &str,
        unit_y: &str,
        window: &FetchWindow,
    ) -> Result<Url> {
        JsonHttpClient::url_with_params(
            &format!("{}/", self.host),
            &[
                ("property_x", property_x.to_string()),
                ("property_y", property_y.to_string()),
                ("unit_x", unit_x.to_string()),
                ("unit_y", unit_y.to_string()),
                ("date_from", window.from_param()),
                ("date_to", window.to_param()),
                ("limit", self.limit.to_string()),
            ],
        )
    }
}

#[async_trait]
impl GraphRepository for LiveIncrementalRepository {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch_snapshot(&self, property_x: &str, property_y: &str) -> Result<SeriesCollection> {
        tracing::debug!(
            "{} has no full dump for {} / {}",
            Self::NAME,
            property_x,
            property_y
        );
        Ok(SeriesCollection::empty())
    }

    async fn fetch_incremental(
        &self,
        property_x: &str,
        property_y: &str,
        unit_x: &str,
        unit_y: &str,
        window: Option<FetchWindow>,
    ) -> Result<SeriesCollection> {
        let window = window.unwrap_or_else(|| Self::default_window(Utc::now(), self.offset));
        let url = self.query_url(property_x, property_y, unit_x, unit_y, &window)?;
        let body = self.client.get_json(url).await?;

        let series: SeriesCollection = parse_live(body)?
            .into_iter()
            .map(|series| series.in_offset(self.offset))
            .collect();

        tracing::debug!(
            "Fetched {} incremental series for {} / {} between {} and {}",
            series.len(),
            property_x,
            property_y,
            window.from_param(),
            window.to_param()
        );
        Ok(series)
    }
}
