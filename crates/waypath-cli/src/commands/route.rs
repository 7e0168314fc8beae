//! Route command handler for computing paths between two points.

use std::path::Path;

use anyhow::{Context, Result};

use waypath_cli::config::load_graph;
use waypath_cli::output::{render_route, OutputFormat};
use waypath_lib::{
    plan_route_indexed, Point, RouteAlgorithm, RouteRequest, RouteSummary, VertexIndex,
};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting point.
    pub from: Point,
    /// Destination point.
    pub to: Point,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from, self.to).with_algorithm(self.algorithm)
    }
}

/// Handle the route subcommand.
///
/// Snaps both points onto the route graph and prints the path between them.
pub fn handle_route_command(
    routes: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_graph(routes)?;
    let index = VertexIndex::build(&graph);

    let plan = plan_route_indexed(&graph, &index, &args.to_request())
        .with_context(|| format!("failed to plan route from {} to {}", args.from, args.to))?;

    let summary = RouteSummary::from_plan(&plan);
    render_route(&summary, format).context("failed to write route output")?;
    Ok(())
}
