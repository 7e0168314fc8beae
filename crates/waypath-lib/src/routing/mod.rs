//! Route planning between arbitrary points.
//!
//! This module is the composition root for a single query:
//!
//! 1. Snap the start and goal points onto the graph (no-op for vertices).
//! 2. Run the selected planner between the snapped vertices.
//! 3. Return the path together with the connector segments that join each
//!    original point to its vertex.
//!
//! # Example
//!
//! ```
//! use waypath_lib::{build_graph, plan_route, Point, RouteRequest};
//!
//! let routes = vec![vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(3.0, 0.0),
//!     Point::new(3.0, 4.0),
//! ]];
//! let graph = build_graph(&routes);
//! let request = RouteRequest::new(Point::new(-1.0, 0.0), Point::new(3.0, 4.0));
//! let plan = plan_route(&graph, &request).unwrap();
//! assert_eq!(plan.hop_count(), 2);
//! assert_eq!(plan.connectors().len(), 1);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::graph::Graph;
use crate::path::Path;
use crate::point::{Point, Segment};
use crate::spatial::{snap_to_graph, Snap, VertexIndex};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm.
    #[default]
    Dijkstra,
    /// A* search (heuristic guided).
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown route algorithm: {other}")),
        }
    }
}

/// A single route query between two arbitrary points.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest {
    pub start: Point,
    pub goal: Point,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Request using the default algorithm.
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: Snap,
    pub goal: Snap,
    pub path: Path,
}

impl RoutePlan {
    /// Number of graph edges in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }

    /// Length of the graph path, excluding connectors.
    pub fn total_distance(&self) -> f64 {
        self.path.total_distance
    }

    /// Length of the graph path plus both connectors.
    pub fn total_distance_with_connectors(&self) -> f64 {
        self.path.total_distance + self.start.distance + self.goal.distance
    }

    /// Connector segments for query points that were moved onto the graph,
    /// start first.
    pub fn connectors(&self) -> Vec<Segment> {
        self.start
            .connector()
            .into_iter()
            .chain(self.goal.connector())
            .collect()
    }
}

/// Snap both request points onto `graph` and find the route between them.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = snap_to_graph(graph, request.start)?;
    let goal = snap_to_graph(graph, request.goal)?;
    solve(graph, request.algorithm, start, goal)
}

/// Like [`plan_route`], snapping through a prebuilt [`VertexIndex`].
///
/// The index must have been built from `graph`.
pub fn plan_route_indexed(
    graph: &Graph,
    index: &VertexIndex,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let start = snap_indexed(graph, index, request.start)?;
    let goal = snap_indexed(graph, index, request.goal)?;
    solve(graph, request.algorithm, start, goal)
}

fn snap_indexed(graph: &Graph, index: &VertexIndex, query: Point) -> Result<Snap> {
    if graph.contains(&query) {
        return Ok(Snap::new(query, query));
    }
    index.nearest(query)
}

fn solve(graph: &Graph, algorithm: RouteAlgorithm, start: Snap, goal: Snap) -> Result<RoutePlan> {
    let planner = select_planner(algorithm);
    let path = planner.find_path(graph, start.vertex, goal.vertex)?;

    info!(
        %algorithm,
        start = %start.vertex,
        goal = %goal.vertex,
        hops = path.hop_count(),
        distance = path.total_distance,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm,
        start,
        goal,
        path,
    })
}
