// Repository trait for measurement curve sources
use crate::domain::error::Result;
use crate::domain::graph::SeriesCollection;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat};

/// Inclusive time window for an incremental query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

impl FetchWindow {
    pub fn new(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> Self {
        Self { from, to }
    }

    /// `from` as sent on the wire, e.g. `2024-01-01T00:00:00+09:00`.
    pub fn from_param(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn to_param(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

#[async_trait]
pub trait GraphRepository: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Every curve the source holds for a property pair
    async fn fetch_snapshot(&self, property_x: &str, property_y: &str) -> Result<SeriesCollection>;

    /// Curves updated inside `window`; the source picks its own window when none is given
    async fn fetch_incremental(
        &self,
        property_x: &str,
        property_y: &str,
        unit_x: &str,
        unit_y: &str,
        window: Option<FetchWindow>,
    ) -> Result<SeriesCollection>;
}
