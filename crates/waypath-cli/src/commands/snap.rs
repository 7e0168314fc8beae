//! Snap command handler: report the graph vertex nearest to a point.

use std::path::Path;

use anyhow::{Context, Result};

use waypath_cli::config::load_graph;
use waypath_cli::output::{render_snap, OutputFormat};
use waypath_lib::{snap_to_graph, Point};

pub fn handle_snap_command(
    routes: Option<&Path>,
    format: OutputFormat,
    point: Point,
) -> Result<()> {
    let graph = load_graph(routes)?;
    let snap = snap_to_graph(&graph, point).with_context(|| format!("failed to snap {point}"))?;
    render_snap(&snap, format).context("failed to write snap output")?;
    Ok(())
}
