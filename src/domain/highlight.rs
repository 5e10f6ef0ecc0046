// Highlight predicates evaluated against a series' metadata
use super::graph::Series;
use serde::Serialize;

/// Length of the `YYYY-MM-DD` prefix of an `updated_at` value.
const DATE_PREFIX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HighlightCondition {
    /// Inclusive calendar-date range compared as plain strings against the
    /// first ten characters of `updated_at`. The timestamp's offset is ignored.
    DateRange { from: String, to: String },
    SeriesId { sid: String },
    Composition { composition: String },
}

impl HighlightCondition {
    pub fn date_range(from: impl Into<String>, to: impl Into<String>) -> Self {
        HighlightCondition::DateRange {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn series_id(sid: impl Into<String>) -> Self {
        HighlightCondition::SeriesId { sid: sid.into() }
    }

    pub fn composition(composition: impl Into<String>) -> Self {
        HighlightCondition::Composition {
            composition: composition.into(),
        }
    }

    pub fn matches(&self, series: &Series) -> bool {
        match self {
            HighlightCondition::DateRange { from, to } => {
                let date = date_prefix(series.updated_at());
                from.as_str() <= date && date <= to.as_str()
            }
            HighlightCondition::SeriesId { sid } => series.sid() == sid,
            HighlightCondition::Composition { composition } => {
                series.composition() == Some(composition.as_str())
            }
        }
    }
}

fn date_prefix(updated_at: &str) -> &str {
    match updated_at.char_indices().nth(DATE_PREFIX_LEN) {
        Some((end, _)) => &updated_at[..end],
        None => updated_at,
    }
}
