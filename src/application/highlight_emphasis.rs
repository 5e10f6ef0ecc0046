// Recency-weighted emphasis for highlighted curves
use crate::application::graph_data_service::SeriesCollectionDto;
use crate::domain::graph::{Point, Series};
use serde::Serialize;

const MARKER_SIZE_BASE: f64 = 2.0;
const MARKER_SIZE_SPAN: f64 = 4.0;
const POINT_LINE_WIDTH_BASE: f64 = 0.1;
const POINT_LINE_WIDTH_SPAN: f64 = 0.4;
const LINE_WIDTH_BASE: f64 = 0.1;
const LINE_WIDTH_SPAN: f64 = 0.2;

/// Styling hints for one highlighted curve. Fresher curves get bigger markers
/// and thicker lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEmphasis {
    pub sid: String,
    /// `{sid}-{figure_id}-{sample_id}`, drawn next to the last point.
    pub label: String,
    pub end_point: Option<Point>,
    pub marker_size: f64,
    pub point_line_width: f64,
    pub line_width: f64,
}

/// One entry per highlighted curve, in draw order.
pub fn emphasize(collection: &SeriesCollectionDto) -> Vec<SeriesEmphasis> {
    let highlighted: Vec<&Series> = collection.highlighted().collect();
    let instants: Vec<i64> = highlighted
        .iter()
        .map(|series| series.updated_instant().timestamp_millis())
        .collect();

    let oldest = instants.iter().copied().min().unwrap_or(0);
    let newest = instants.iter().copied().max().unwrap_or(0);

    highlighted
        .into_iter()
        .zip(instants)
        .map(|(series, instant)| {
            let recency = if newest > oldest {
                (instant - oldest) as f64 / (newest - oldest) as f64
            } else {
                0.0
            };

            SeriesEmphasis {
                sid: series.sid().to_string(),
                label: label(series),
                end_point: series.last_point(),
                marker_size: MARKER_SIZE_BASE + recency * MARKER_SIZE_SPAN,
                point_line_width: POINT_LINE_WIDTH_BASE + recency * POINT_LINE_WIDTH_SPAN,
                line_width: LINE_WIDTH_BASE + recency * LINE_WIDTH_SPAN,
            }
        })
        .collect()
}

fn label(series: &Series) -> String {
    format!(
        "{}-{}-{}",
        series.sid(),
        series.figure_id().unwrap_or_default(),
        series.sample_id().unwrap_or_default()
    )
}
