//! Waypath library entry points.
//!
//! This crate turns polylines ("routes") into an undirected graph keyed by
//! point identity, snaps arbitrary points onto that graph, and finds
//! minimum-length paths between them. Higher-level consumers (the CLI, any
//! renderer) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod point;
pub mod routing;
pub mod spatial;

pub use error::{Error, Result};
pub use graph::{build_graph, build_graph_with, Edge, Graph, GraphBuildOptions};
pub use loader::{load_routes, parse_routes};
pub use output::{GraphSummary, RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{shortest_path, shortest_path_a_star, Path};
pub use point::{Point, Route, Segment};
pub use routing::{
    plan_route, plan_route_indexed, select_planner, RouteAlgorithm, RoutePlan, RoutePlanner,
    RouteRequest,
};
pub use spatial::{find_closest_point, snap_to_graph, Snap, VertexIndex};
