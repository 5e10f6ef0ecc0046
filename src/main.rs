// Main entry point - Dependency injection and a single reconciliation run
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use material_graphs::infrastructure::config::load_sources_config;
use material_graphs::{
    BulkSnapshotRepository, GraphDataService, HighlightCondition, LiveIncrementalRepository,
    MaterialType,
};

#[derive(Parser, Debug)]
#[command(name = "material-graphs", about = "Merge snapshot and live measurement curves")]
struct Args {
    /// thermoelectric, battery or magnetic
    #[arg(long, default_value = "thermoelectric")]
    material: MaterialType,

    /// X property; defaults to the material's first catalogued graph
    #[arg(long, requires = "property_y")]
    property_x: Option<String>,

    #[arg(long, requires = "property_x")]
    property_y: Option<String>,

    /// Highlight the curve with this SID
    #[arg(long, conflicts_with_all = ["highlight_from", "highlight_composition"])]
    highlight_sid: Option<String>,

    /// Highlight curves updated on or after this date (YYYY-MM-DD)
    #[arg(long, requires = "highlight_to")]
    highlight_from: Option<String>,

    #[arg(long, requires = "highlight_from")]
    highlight_to: Option<String>,

    #[arg(long, conflicts_with = "highlight_from")]
    highlight_composition: Option<String>,
}

impl Args {
    fn highlight_condition(&self) -> Option<HighlightCondition> {
        if let Some(sid) = &self.highlight_sid {
            return Some(HighlightCondition::series_id(sid.as_str()));
        }
        if let Some(composition) = &self.highlight_composition {
            return Some(HighlightCondition::composition(composition.as_str()));
        }
        match (&self.highlight_from, &self.highlight_to) {
            (Some(from), Some(to)) => {
                Some(HighlightCondition::date_range(from.as_str(), to.as_str()))
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    // Load configuration
    let sources = load_sources_config()?;
    let offset = sources.reporting.offset()?;

    // Create repositories (infrastructure layer)
    let snapshot = Arc::new(BulkSnapshotRepository::new(&sources.bulk)?);
    let incremental = Arc::new(LiveIncrementalRepository::new(&sources.live, offset)?);

    // Create service (application layer)
    let service = GraphDataService::new(snapshot, incremental);

    let (property_x, property_y) = match (&args.property_x, &args.property_y) {
        (Some(x), Some(y)) => (x.clone(), y.clone()),
        _ => {
            let first = args
                .material
                .graphs()
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("no graphs catalogued for {}", args.material))?;
            (first.x_axis.property, first.y_axis.property)
        }
    };

    let condition = args.highlight_condition();
    let graph = service
        .get_graph(args.material, &property_x, &property_y, condition.as_ref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&graph)?);

    Ok(())
}
