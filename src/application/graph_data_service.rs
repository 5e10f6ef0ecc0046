// Graph data service - Merge snapshot and incremental curves, then classify highlights
use crate::application::graph_repository::GraphRepository;
use crate::application::highlight_emphasis::{emphasize, SeriesEmphasis};
use crate::domain::error::Result;
use crate::domain::graph::{Axis, Series, SeriesCollection};
use crate::domain::highlight::HighlightCondition;
use crate::domain::material::MaterialType;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDto {
    pub series: Series,
    pub is_highlighted: bool,
}

impl SeriesDto {
    pub fn new(series: Series, is_highlighted: bool) -> Self {
        Self {
            series,
            is_highlighted,
        }
    }
}

/// Curves in draw order; later entries render over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesCollectionDto {
    entries: Vec<SeriesDto>,
}

impl SeriesCollectionDto {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesDto> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[SeriesDto] {
        &self.entries
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &Series> {
        self.entries
            .iter()
            .filter(|entry| entry.is_highlighted)
            .map(|entry| &entry.series)
    }

    pub fn highlighted_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_highlighted).count()
    }
}

impl FromIterator<SeriesDto> for SeriesCollectionDto {
    fn from_iter<I: IntoIterator<Item = SeriesDto>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Everything the plotting side needs for one property pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDto {
    pub material: MaterialType,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: SeriesCollectionDto,
    pub emphasis: Vec<SeriesEmphasis>,
}

/// Tag every curve with its highlight flag. With a condition the result is a
/// stable partition: non-matching curves first, matching ones after, each
/// group in merged order.
pub fn classify(
    merged: SeriesCollection,
    condition: Option<&HighlightCondition>,
) -> SeriesCollectionDto {
    let Some(condition) = condition else {
        return merged
            .into_iter()
            .map(|series| SeriesDto::new(series, false))
            .collect();
    };

    let (matching, non_matching): (Vec<Series>, Vec<Series>) = merged
        .into_iter()
        .partition(|series| condition.matches(series));

    non_matching
        .into_iter()
        .map(|series| SeriesDto::new(series, false))
        .chain(matching.into_iter().map(|series| SeriesDto::new(series, true)))
        .collect()
}

#[derive(Clone)]
pub struct GraphDataService {
    snapshot: Arc<dyn GraphRepository>,
    incremental: Arc<dyn GraphRepository>,
}

impl GraphDataService {
    pub fn new(snapshot: Arc<dyn GraphRepository>, incremental: Arc<dyn GraphRepository>) -> Self {
        Self {
            snapshot,
            incremental,
        }
    }

    /// Fetch both sources, append the incremental curves after the snapshot
    /// and classify the result. Either fetch failing fails the whole call.
    pub async fn get_merged_graph_data(
        &self,
        property_x: &str,
        property_y: &str,
        unit_x: &str,
        unit_y: &str,
        condition: Option<&HighlightCondition>,
    ) -> Result<SeriesCollectionDto> {
        // Completion order is irrelevant: the merge below fixes snapshot-first.
        let (snapshot, incremental) = tokio::try_join!(
            self.snapshot.fetch_snapshot(property_x, property_y),
            self.incremental
                .fetch_incremental(property_x, property_y, unit_x, unit_y, None),
        )?;

        let snapshot_count = snapshot.len();
        let incremental_count = incremental.len();
        let merged = snapshot.concat(incremental);
        let classified = classify(merged, condition);

        tracing::info!(
            property_x,
            property_y,
            snapshot = snapshot_count,
            incremental = incremental_count,
            highlighted = classified.highlighted_count(),
            "Merged graph data from {} and {}",
            self.snapshot.name(),
            self.incremental.name()
        );

        Ok(classified)
    }

    /// Merge a catalogued graph, querying the live source in the catalog's units.
    pub async fn get_graph(
        &self,
        material: MaterialType,
        property_x: &str,
        property_y: &str,
        condition: Option<&HighlightCondition>,
    ) -> Result<GraphDto> {
        let spec = material.find_graph(property_x, property_y)?;
        let series = self
            .get_merged_graph_data(
                &spec.x_axis.property,
                &spec.y_axis.property,
                &spec.x_axis.unit,
                &spec.y_axis.unit,
                condition,
            )
            .await?;
        let emphasis = emphasize(&series);

        Ok(GraphDto {
            material,
            x_axis: spec.x_axis,
            y_axis: spec.y_axis,
            series,
            emphasis,
        })
    }
}
