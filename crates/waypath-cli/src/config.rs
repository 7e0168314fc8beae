//! Resolution of the route file used by every subcommand.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use waypath_lib::{build_graph, load_routes, Graph};

/// Environment variable consulted when `--routes` is not given.
pub const ROUTES_ENV: &str = "WAYPATH_ROUTES";

/// Resolve the route file path.
///
/// The resolution order is:
/// 1. Explicit `--routes` argument when provided.
/// 2. `WAYPATH_ROUTES` environment variable.
pub fn resolve_routes_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(env_path) = env::var_os(ROUTES_ENV) {
        debug!(variable = ROUTES_ENV, "using route file from environment");
        return Ok(PathBuf::from(env_path));
    }

    bail!("no route file given; pass --routes or set {ROUTES_ENV}")
}

/// Load routes from the resolved file and build the graph.
pub fn load_graph(explicit: Option<&Path>) -> Result<Graph> {
    let path = resolve_routes_path(explicit)?;
    let routes = load_routes(&path)
        .with_context(|| format!("failed to load routes from {}", path.display()))?;
    Ok(build_graph(&routes))
}
