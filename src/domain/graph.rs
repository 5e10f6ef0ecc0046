// Graph domain models: points, curves and the axes they are drawn against
use super::error::{GraphError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use serde::Serialize;

/// Offset-less layouts seen in upstream payloads; read as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an `updated_at` value. RFC 3339 keeps its own offset, anything
/// without an offset is taken to be UTC.
pub fn parse_updated_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Provenance metadata as it arrives from a source, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMetadata {
    pub updated_at: Option<String>,
    pub sid: Option<String>,
    pub figure_id: Option<String>,
    pub sample_id: Option<String>,
    pub composition: Option<String>,
}

impl SeriesMetadata {
    pub fn new(updated_at: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            updated_at: Some(updated_at.into()),
            sid: Some(sid.into()),
            ..Self::default()
        }
    }

    pub fn with_figure_id(mut self, figure_id: impl Into<String>) -> Self {
        self.figure_id = Some(figure_id.into());
        self
    }

    pub fn with_sample_id(mut self, sample_id: impl Into<String>) -> Self {
        self.sample_id = Some(sample_id.into());
        self
    }

    pub fn with_composition(mut self, composition: impl Into<String>) -> Self {
        self.composition = Some(composition.into());
        self
    }
}

/// One x–y curve with its provenance. Only obtainable through [`make_series`],
/// so `updated_at` is always present and parseable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<Point>,
    updated_at: String,
    #[serde(skip)]
    updated_instant: DateTime<FixedOffset>,
    sid: String,
    figure_id: Option<String>,
    sample_id: Option<String>,
    composition: Option<String>,
}

/// Build a series from parallel coordinate lists.
///
/// Fails with [`GraphError::Validation`] when the lists differ in length and
/// with [`GraphError::Schema`] when `updated_at` or `sid` is missing, or when
/// `updated_at` cannot be parsed.
pub fn make_series(xs: Vec<f64>, ys: Vec<f64>, metadata: SeriesMetadata) -> Result<Series> {
    if xs.len() != ys.len() {
        return Err(GraphError::Validation(format!(
            "x has {} values but y has {}",
            xs.len(),
            ys.len()
        )));
    }

    let updated_at = metadata
        .updated_at
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| GraphError::Schema("series is missing updated_at".to_string()))?;
    let updated_instant = parse_updated_at(&updated_at).ok_or_else(|| {
        GraphError::Schema(format!("updated_at {:?} is not a timestamp", updated_at))
    })?;
    let sid = metadata
        .sid
        .ok_or_else(|| GraphError::Schema("series is missing SID".to_string()))?;

    let points = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y))
        .collect();

    Ok(Series {
        points,
        updated_at,
        updated_instant,
        sid,
        figure_id: metadata.figure_id,
        sample_id: metadata.sample_id,
        composition: metadata.composition,
    })
}

impl Series {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn updated_instant(&self) -> DateTime<FixedOffset> {
        self.updated_instant
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn figure_id(&self) -> Option<&str> {
        self.figure_id.as_deref()
    }

    pub fn sample_id(&self) -> Option<&str> {
        self.sample_id.as_deref()
    }

    pub fn composition(&self) -> Option<&str> {
        self.composition.as_deref()
    }

    /// The same curve with `updated_at` re-expressed at `offset`.
    pub fn in_offset(self, offset: FixedOffset) -> Series {
        let updated_instant = self.updated_instant.with_timezone(&offset);
        Series {
            updated_at: updated_instant.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            updated_instant,
            ..self
        }
    }
}

/// Ordered curves. Order coming in means nothing; order going out is draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesCollection {
    series: Vec<Series>,
}

impl SeriesCollection {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn as_slice(&self) -> &[Series] {
        &self.series
    }

    /// `self` followed by `later`; later entries draw on top.
    pub fn concat(self, later: SeriesCollection) -> SeriesCollection {
        let mut series = self.series;
        series.extend(later.series);
        SeriesCollection { series }
    }
}

impl FromIterator<Series> for SeriesCollection {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for SeriesCollection {
    type Item = Series;
    type IntoIter = std::vec::IntoIter<Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Logarithmic,
}

impl AxisScale {
    pub fn is_log(&self) -> bool {
        matches!(self, AxisScale::Logarithmic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Logarithmic => "logarithmic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Labeling information for one axis. Not consulted by the merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub property: String,
    pub unit: String,
    pub scale: AxisScale,
    pub range: AxisRange,
}

impl Axis {
    pub fn new(property: &str, unit: &str, scale: AxisScale, min: f64, max: f64) -> Self {
        Self {
            property: property.to_string(),
            unit: unit.to_string(),
            scale,
            range: AxisRange { min, max },
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.property, self.unit)
    }
}

/// A catalogued property pair with its default axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSpec {
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl GraphSpec {
    pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Self { x_axis, y_axis }
    }

    pub fn is_pair(&self, property_x: &str, property_y: &str) -> bool {
        self.x_axis.property == property_x && self.y_axis.property == property_y
    }
}
