//! Nearest-vertex matching for snapping arbitrary points onto the graph.
//!
//! Two entry points share one contract:
//!
//! - [`find_closest_point`] scans a candidate slice linearly. It is the
//!   reference behaviour: minimum Euclidean distance, with exact ties going to
//!   the candidate that appears first.
//! - [`VertexIndex`] answers the same question through a KD-tree built once
//!   per graph, which pays off when many query points are snapped against the
//!   same graph. Results are post-processed so they match the linear scan
//!   exactly, including tie-breaks by first-seen vertex order.
//!
//! # Example
//!
//! ```
//! use waypath_lib::{build_graph, Point, VertexIndex};
//!
//! let graph = build_graph(&[vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]]);
//! let index = VertexIndex::build(&graph);
//! let snap = index.nearest(Point::new(1.0, 1.0)).unwrap();
//! assert_eq!(snap.vertex, Point::new(0.0, 0.0));
//! ```

use std::collections::HashMap;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::point::{Point, Segment};

/// KD-tree bucket size. A bucket cannot be split when every point in it shares
/// the splitting coordinate, so the index refuses to build a tree when more
/// than this many vertices share an x or y value.
const BUCKET_SIZE: usize = 64;

/// Number of candidates requested from the tree before widening for ties.
const INITIAL_FETCH: usize = 4;

/// Return the candidate closest to `query`.
///
/// Exact distance ties resolve to the earliest candidate in `candidates`.
/// When `query` is itself a candidate it wins with distance zero. A NaN
/// distance ranks behind every real one, so a candidate with a NaN coordinate
/// only wins when nothing else can.
pub fn find_closest_point(query: Point, candidates: &[Point]) -> Result<Point> {
    closest_with_distance(query, candidates).map(|(_, point, _)| point)
}

fn closest_with_distance(query: Point, candidates: &[Point]) -> Result<(usize, Point, f64)> {
    let mut best: Option<(usize, Point, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = query.distance_to(candidate);
        let improves = match best {
            Some((_, _, best_distance)) => rank(distance) < rank(best_distance),
            None => true,
        };
        if improves {
            best = Some((index, *candidate, distance));
        }
    }
    best.ok_or(Error::EmptyInput)
}

/// Sort key for a distance: NaN is treated as infinitely far.
fn rank(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}

/// Outcome of snapping a query point onto the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snap {
    /// The point that was asked about.
    pub query: Point,
    /// The graph vertex it was matched to.
    pub vertex: Point,
    /// Euclidean distance between `query` and `vertex`.
    pub distance: f64,
}

impl Snap {
    pub fn new(query: Point, vertex: Point) -> Self {
        Self {
            query,
            vertex,
            distance: query.distance_to(&vertex),
        }
    }

    /// True when the query point already was a graph vertex.
    pub fn is_exact(&self) -> bool {
        self.query == self.vertex
    }

    /// Segment from the query point to its vertex, if snapping moved it.
    pub fn connector(&self) -> Option<Segment> {
        (!self.is_exact()).then(|| Segment::new(self.query, self.vertex))
    }
}

/// Snap `query` onto `graph`, skipping the search when it is already a vertex.
pub fn snap_to_graph(graph: &Graph, query: Point) -> Result<Snap> {
    if graph.contains(&query) {
        return Ok(Snap::new(query, query));
    }
    let vertex = find_closest_point(query, graph.vertices())?;
    debug!(%query, %vertex, "snapped query point");
    Ok(Snap::new(query, vertex))
}

/// KD-tree over a graph's vertices for repeated nearest-vertex queries.
///
/// Only vertices with finite coordinates go into the tree. Queries that the
/// tree cannot answer exactly (non-finite query points, distances that
/// overflow, more results than indexed vertices) fall back to a linear scan.
pub struct VertexIndex {
    /// `None` when the vertex layout would overflow a bucket or no vertex is
    /// finite; queries then fall back to a linear scan.
    tree: Option<KdTree<f64, usize, 2, BUCKET_SIZE, u32>>,
    /// Number of vertices held by `tree`.
    indexed: usize,
    /// Vertices in graph order; tree items are indices into this list.
    points: Vec<Point>,
}

impl VertexIndex {
    /// Build an index from the graph's vertex list.
    pub fn build(graph: &Graph) -> Self {
        Self::from_points(graph.vertices().to_vec())
    }

    /// Build an index over an arbitrary candidate list.
    pub fn from_points(points: Vec<Point>) -> Self {
        let finite: Vec<(usize, Point)> = points
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, point)| point.is_finite())
            .collect();
        if finite.len() < points.len() {
            debug!(
                skipped = points.len() - finite.len(),
                "vertices with non-finite coordinates left out of the vertex index"
            );
        }

        let tree = if finite.is_empty() {
            None
        } else if fits_buckets(finite.iter().map(|(_, point)| point)) {
            let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
            for (index, point) in &finite {
                tree.add(&[point.x, point.y], *index);
            }
            Some(tree)
        } else {
            warn!(
                vertices = points.len(),
                "too many vertices share a coordinate; vertex index falls back to linear scan"
            );
            None
        };
        let indexed = if tree.is_some() { finite.len() } else { 0 };

        debug!(vertices = points.len(), indexed, "built vertex index");
        Self {
            tree,
            indexed,
            points,
        }
    }

    /// Number of vertices, including any the tree leaves out.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Snap `query` to its nearest vertex.
    pub fn nearest(&self, query: Point) -> Result<Snap> {
        let found = match self.usable_tree(query) {
            Some(tree) => self.tree_nearest(tree, query),
            None => None,
        };
        let (index, distance) = match found {
            Some(found) => found,
            None => {
                let (index, _, distance) = closest_with_distance(query, &self.points)?;
                (index, distance)
            }
        };
        Ok(Snap {
            query,
            vertex: self.points[index],
            distance,
        })
    }

    /// Find up to `k` nearest vertices, closest first.
    ///
    /// Equal distances keep graph vertex order; NaN distances come last.
    pub fn nearest_n(&self, query: Point, k: usize) -> Vec<Snap> {
        if k == 0 || self.points.is_empty() {
            return Vec::new();
        }

        let from_tree = match self.usable_tree(query) {
            Some(tree) if k <= self.indexed => self.tree_nearest_n(tree, query, k),
            _ => None,
        };
        let mut ranked = from_tree.unwrap_or_else(|| {
            self.points
                .iter()
                .enumerate()
                .map(|(index, point)| (index, query.distance_to(point)))
                .collect()
        });

        ranked.sort_by(|a, b| rank(a.1).total_cmp(&rank(b.1)).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
            .into_iter()
            .map(|(index, distance)| Snap {
                query,
                vertex: self.points[index],
                distance,
            })
            .collect()
    }

    fn usable_tree(&self, query: Point) -> Option<&KdTree<f64, usize, 2, BUCKET_SIZE, u32>> {
        self.tree.as_ref().filter(|_| query.is_finite())
    }

    /// Nearest indexed vertex, or `None` when the answer could involve a
    /// vertex outside the tree.
    fn tree_nearest(
        &self,
        tree: &KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
        query: Point,
    ) -> Option<(usize, f64)> {
        let coords = [query.x, query.y];
        let mut fetch = INITIAL_FETCH.min(self.indexed);
        loop {
            let candidates = tree.nearest_n::<SquaredEuclidean>(&coords, fetch);

            let mut best: Option<(usize, f64)> = None;
            let mut farthest = 0.0f64;
            for neighbour in &candidates {
                let distance = query.distance_to(&self.points[neighbour.item]);
                farthest = farthest.max(distance);
                let improves = match best {
                    Some((index, best_distance)) => {
                        distance < best_distance
                            || (distance == best_distance && neighbour.item < index)
                    }
                    None => true,
                };
                if improves {
                    best = Some((neighbour.item, distance));
                }
            }

            let (index, distance) = best?;
            // An overflowing distance ties with the vertices left out of the tree.
            if !distance.is_finite() {
                return None;
            }
            // Everything the tree did not return is at least `farthest` away, so
            // a tie with the winner can only hide beyond the fetched set when
            // every fetched candidate is tied.
            if farthest > distance || fetch >= self.indexed {
                return Some((index, distance));
            }
            fetch = fetch.saturating_mul(2).min(self.indexed);
        }
    }

    fn tree_nearest_n(
        &self,
        tree: &KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
        query: Point,
        k: usize,
    ) -> Option<Vec<(usize, f64)>> {
        let coords = [query.x, query.y];
        let mut fetch = k.saturating_add(INITIAL_FETCH).min(self.indexed);
        loop {
            let ranked: Vec<(usize, f64)> = tree
                .nearest_n::<SquaredEuclidean>(&coords, fetch)
                .into_iter()
                .map(|neighbour| {
                    let distance = query.distance_to(&self.points[neighbour.item]);
                    (neighbour.item, distance)
                })
                .collect();

            let mut distances: Vec<f64> = ranked.iter().map(|(_, d)| *d).collect();
            distances.sort_by(f64::total_cmp);
            let kth = *distances.get(k.min(distances.len()).checked_sub(1)?)?;
            if !kth.is_finite() {
                return None;
            }

            // Widen while the cut-off distance could still be shared by
            // vertices outside the fetched set.
            let cutoff = distances.last().copied().unwrap_or(kth);
            if fetch >= self.indexed || kth < cutoff {
                return Some(ranked);
            }
            fetch = fetch.saturating_mul(2).min(self.indexed);
        }
    }
}

fn fits_buckets<'a>(points: impl Iterator<Item = &'a Point>) -> bool {
    let mut xs: HashMap<u64, usize> = HashMap::new();
    let mut ys: HashMap<u64, usize> = HashMap::new();
    for point in points {
        // Adding zero folds -0.0 into 0.0, which the tree treats as equal.
        let x = xs.entry((point.x + 0.0).to_bits()).or_default();
        *x += 1;
        let y = ys.entry((point.y + 0.0).to_bits()).or_default();
        *y += 1;
        if *x >= BUCKET_SIZE || *y >= BUCKET_SIZE {
            return false;
        }
    }
    true
}
