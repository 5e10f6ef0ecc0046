// Graph data reconciliation: merge the daily snapshot with the live increment
// and classify curves against highlight conditions.
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::graph_data_service::{
    classify, GraphDataService, GraphDto, SeriesCollectionDto, SeriesDto,
};
pub use application::graph_repository::{FetchWindow, GraphRepository};
pub use application::highlight_emphasis::SeriesEmphasis;
pub use domain::error::{GraphError, Result};
pub use domain::graph::{
    make_series, Axis, AxisRange, AxisScale, GraphSpec, Point, Series, SeriesCollection,
    SeriesMetadata,
};
pub use domain::highlight::HighlightCondition;
pub use domain::material::MaterialType;
pub use infrastructure::bulk_snapshot_repository::BulkSnapshotRepository;
pub use infrastructure::live_incremental_repository::LiveIncrementalRepository;
