//! Graph command handler: summarise the graph built from the route file.

use std::path::Path;

use anyhow::{Context, Result};

use waypath_cli::config::load_graph;
use waypath_cli::output::{render_graph, OutputFormat};
use waypath_lib::GraphSummary;

pub fn handle_graph_command(routes: Option<&Path>, format: OutputFormat) -> Result<()> {
    let graph = load_graph(routes)?;
    let summary = GraphSummary::from_graph(&graph);
    render_graph(&summary, format).context("failed to write graph output")?;
    Ok(())
}
