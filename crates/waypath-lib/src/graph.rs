use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::point::{Point, Route};

/// Edge within the route graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: Point,
    pub distance: f64,
}

/// Options controlling how routes are turned into a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuildOptions {
    /// Skip inserting an edge when the same endpoints are already connected.
    ///
    /// Overlapping routes otherwise contribute one copy of a shared segment
    /// each. Shortest-path results are identical either way.
    pub dedup_edges: bool,
}

/// Undirected weighted graph keyed by point identity.
///
/// Cloning is cheap; the adjacency is shared and never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<Point, Vec<Edge>>>,
    vertices: Arc<Vec<Point>>,
    edge_count: usize,
}

impl Graph {
    /// Assemble a graph from a raw adjacency list without validating it.
    ///
    /// Neighbour references are taken as given, so the result may mention
    /// vertices that have no adjacency entry of their own. The solver reports
    /// such vertices as [`crate::Error::MalformedGraph`] when it reaches them.
    pub fn from_parts(entries: Vec<(Point, Vec<Edge>)>) -> Self {
        let mut adjacency: HashMap<Point, Vec<Edge>> = HashMap::with_capacity(entries.len());
        let mut vertices = Vec::with_capacity(entries.len());
        for (point, edges) in entries {
            match adjacency.get_mut(&point) {
                Some(existing) => existing.extend(edges),
                None => {
                    vertices.push(point);
                    adjacency.insert(point, edges);
                }
            }
        }
        let edge_count = count_edges(&adjacency);

        Self {
            adjacency: Arc::new(adjacency),
            vertices: Arc::new(vertices),
            edge_count,
        }
    }

    /// Return the adjacency list for `point`, or `None` when it has no entry.
    pub fn neighbours(&self, point: &Point) -> Option<&[Edge]> {
        self.adjacency.get(point).map(Vec::as_slice)
    }

    /// Whether `point` is a vertex of the graph.
    pub fn contains(&self, point: &Point) -> bool {
        self.adjacency.contains_key(point)
    }

    /// Vertices in the order they were first seen while building.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges, counting duplicate insertions.
    ///
    /// For graphs from [`Graph::from_parts`] an edge listed in only one
    /// direction still counts once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Build the route graph, keeping duplicate edges from overlapping routes.
pub fn build_graph(routes: &[Route]) -> Graph {
    build_graph_with(routes, &GraphBuildOptions::default())
}

/// Build the route graph with explicit options.
///
/// Every pair of consecutive points in a route becomes an undirected edge
/// weighted by their Euclidean distance. Routes with fewer than two points
/// contribute nothing, not even a vertex.
pub fn build_graph_with(routes: &[Route], options: &GraphBuildOptions) -> Graph {
    let mut adjacency: HashMap<Point, Vec<Edge>> = HashMap::new();
    let mut vertices = Vec::new();
    let mut edge_count = 0usize;

    for route in routes {
        for pair in route.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let distance = a.distance_to(&b);

            for point in [a, b] {
                if !adjacency.contains_key(&point) {
                    adjacency.insert(point, Vec::new());
                    vertices.push(point);
                }
            }

            if options.dedup_edges && has_edge(&adjacency, &a, &b) {
                continue;
            }

            push_edge(&mut adjacency, a, b, distance);
            push_edge(&mut adjacency, b, a, distance);
            edge_count += 1;
        }
    }

    debug!(
        routes = routes.len(),
        vertices = vertices.len(),
        edges = edge_count,
        "built route graph"
    );

    Graph {
        adjacency: Arc::new(adjacency),
        vertices: Arc::new(vertices),
        edge_count,
    }
}

/// Count undirected edges in an adjacency that may be asymmetric.
///
/// Entries `a -> b` and `b -> a` pair up into one edge; unpaired entries
/// count on their own. A self loop is stored twice on its vertex.
fn count_edges(adjacency: &HashMap<Point, Vec<Edge>>) -> usize {
    let mut pairs: HashMap<(Point, Point), (usize, usize)> = HashMap::new();
    for (from, edges) in adjacency {
        for edge in edges {
            if *from <= edge.target {
                pairs.entry((*from, edge.target)).or_default().0 += 1;
            } else {
                pairs.entry((edge.target, *from)).or_default().1 += 1;
            }
        }
    }

    pairs
        .iter()
        .map(|((a, b), (forward, backward))| {
            if a == b {
                forward.div_ceil(2)
            } else {
                *forward.max(backward)
            }
        })
        .sum()
}

fn has_edge(adjacency: &HashMap<Point, Vec<Edge>>, from: &Point, to: &Point) -> bool {
    adjacency
        .get(from)
        .is_some_and(|edges| edges.iter().any(|edge| edge.target == *to))
}

fn push_edge(adjacency: &mut HashMap<Point, Vec<Edge>>, from: Point, to: Point, distance: f64) {
    adjacency.entry(from).or_default().push(Edge {
        target: to,
        distance,
    });
}
