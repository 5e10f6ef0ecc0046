// XY payload wire format and its mapping onto domain series
//
// Both sources answer with
// { prop_x, prop_y, unit_x, unit_y,
//   data: { x, y, updated_at, SID, figure_id, sample_id, composition } }
// where x[i] / y[i] are the coordinates of curve i and the metadata arrays are parallel to them.
use crate::domain::error::{GraphError, Result};
use crate::domain::graph::{make_series, Series, SeriesMetadata};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
struct XyEnvelope<D> {
    #[serde(default)]
    prop_x: Option<String>,
    #[serde(default)]
    prop_y: Option<String>,
    #[serde(default)]
    unit_x: Option<String>,
    #[serde(default)]
    unit_y: Option<String>,
    data: D,
}

/// Daily dump: metadata arrays may be absent.
#[derive(Debug, Deserialize)]
struct SnapshotData {
    x: Vec<Vec<f64>>,
    y: Vec<Vec<f64>>,
    #[serde(default, deserialize_with = "optional_text_list")]
    updated_at: Option<Vec<String>>,
    #[serde(rename = "SID", default, deserialize_with = "optional_text_list")]
    sid: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_text_list")]
    figure_id: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_text_list")]
    sample_id: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_text_list")]
    composition: Option<Vec<String>>,
}

/// Windowed query: every metadata array is required.
#[derive(Debug, Deserialize)]
struct LiveData {
    x: Vec<Vec<f64>>,
    y: Vec<Vec<f64>>,
    #[serde(deserialize_with = "text_list")]
    updated_at: Vec<String>,
    #[serde(rename = "SID", deserialize_with = "text_list")]
    sid: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    figure_id: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    sample_id: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    composition: Vec<String>,
}

/// Identifiers sometimes arrive as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
}

impl TextValue {
    fn into_string(self) -> String {
        match self {
            TextValue::Text(text) => text,
            TextValue::Number(number) => number.to_string(),
        }
    }
}

fn text_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<TextValue>::deserialize(deserializer)?;
    Ok(values.into_iter().map(TextValue::into_string).collect())
}

fn optional_text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error> {
    let values = Option::<Vec<TextValue>>::deserialize(deserializer)?;
    Ok(values.map(|values| values.into_iter().map(TextValue::into_string).collect()))
}

/// Column-oriented rows shared by both payload flavours.
struct XyColumns {
    x: Vec<Vec<f64>>,
    y: Vec<Vec<f64>>,
    updated_at: Option<Vec<String>>,
    sid: Option<Vec<String>>,
    figure_id: Option<Vec<String>>,
    sample_id: Option<Vec<String>>,
    composition: Option<Vec<String>>,
}

impl From<SnapshotData> for XyColumns {
    fn from(data: SnapshotData) -> Self {
        Self {
            x: data.x,
            y: data.y,
            updated_at: data.updated_at,
            sid: data.sid,
            figure_id: data.figure_id,
            sample_id: data.sample_id,
            composition: data.composition,
        }
    }
}

impl From<LiveData> for XyColumns {
    fn from(data: LiveData) -> Self {
        Self {
            x: data.x,
            y: data.y,
            updated_at: Some(data.updated_at),
            sid: Some(data.sid),
            figure_id: Some(data.figure_id),
            sample_id: Some(data.sample_id),
            composition: Some(data.composition),
        }
    }
}

/// Decode a snapshot body into series, dropping ragged rows.
pub fn parse_snapshot(body: serde_json::Value) -> Result<Vec<Series>> {
    parse::<SnapshotData>(body, "snapshot")
}

/// Decode a live body into series, dropping ragged rows.
pub fn parse_live(body: serde_json::Value) -> Result<Vec<Series>> {
    parse::<LiveData>(body, "live")
}

fn parse<D>(body: serde_json::Value, source: &'static str) -> Result<Vec<Series>>
where
    D: DeserializeOwned + Into<XyColumns>,
{
    let envelope: XyEnvelope<D> = serde_json::from_value(body)
        .map_err(|e| GraphError::Schema(format!("{} response: {}", source, e)))?;

    tracing::debug!(
        "{} payload for {:?} ({:?}) / {:?} ({:?})",
        source,
        envelope.prop_x,
        envelope.unit_x,
        envelope.prop_y,
        envelope.unit_y
    );

    ingest(envelope.data.into(), source)
}

fn ingest(columns: XyColumns, source: &'static str) -> Result<Vec<Series>> {
    let XyColumns {
        x,
        y,
        updated_at,
        sid,
        figure_id,
        sample_id,
        composition,
    } = columns;

    if x.len() != y.len() {
        tracing::warn!(
            "{} response has {} x rows but {} y rows; unmatched rows are dropped",
            source,
            x.len(),
            y.len()
        );
    }

    let cell = |column: &Option<Vec<String>>, row: usize| -> Option<String> {
        column.as_ref().and_then(|values| values.get(row)).cloned()
    };

    let mut series = Vec::with_capacity(x.len().min(y.len()));
    let mut dropped = x.len().abs_diff(y.len());

    for (row, (xs, ys)) in x.into_iter().zip(y).enumerate() {
        if xs.is_empty() || ys.is_empty() || xs.len() != ys.len() {
            dropped += 1;
            continue;
        }

        let metadata = SeriesMetadata {
            updated_at: cell(&updated_at, row),
            sid: cell(&sid, row),
            figure_id: cell(&figure_id, row),
            sample_id: cell(&sample_id, row),
            composition: cell(&composition, row),
        };

        let built = make_series(xs, ys, metadata).map_err(|e| match e {
            GraphError::Schema(reason) => {
                GraphError::Schema(format!("{} row {}: {}", source, row, reason))
            }
            other => other,
        })?;
        series.push(built);
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} malformed rows from {} response", dropped, source);
    }

    Ok(series)
}
