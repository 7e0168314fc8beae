use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::point::{Point, Segment};

/// Ordered sequence of adjacent graph vertices from a start to a goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub points: Vec<Point>,
    /// Sum of the edge weights along `points`.
    pub total_distance: f64,
}

impl Path {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Consecutive vertex pairs as segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }
}

/// Find the minimum-weight path from `start` to `goal` with Dijkstra's
/// algorithm.
///
/// The search stops as soon as `goal` is dequeued. Fails with
/// [`Error::Unreachable`] when the frontier empties first, and with
/// [`Error::MalformedGraph`] when it dequeues a vertex that has no adjacency
/// entry.
pub fn shortest_path(graph: &Graph, start: Point, goal: Point) -> Result<Path> {
    if start == goal {
        return Ok(Path {
            points: vec![start],
            total_distance: 0.0,
        });
    }

    let mut distances: HashMap<Point, f64> = HashMap::new();
    let mut parents: HashMap<Point, Option<Point>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Ok(Path {
                points: reconstruct_path(&parents, start, goal),
                total_distance: current_distance,
            });
        }

        let edges = graph
            .neighbours(&entry.node)
            .ok_or(Error::MalformedGraph { vertex: entry.node })?;

        for edge in edges {
            let next = edge.target;
            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    trace!(settled = distances.len(), "frontier exhausted");
    Err(Error::Unreachable { start, goal })
}

/// Find the minimum-weight path from `start` to `goal` with A* search.
///
/// The straight-line distance to `goal` guides the search. It never
/// overestimates as long as every edge weight is at least the Euclidean length
/// of its edge, which holds for graphs produced by [`crate::build_graph`].
/// Error semantics match [`shortest_path`].
pub fn shortest_path_a_star(graph: &Graph, start: Point, goal: Point) -> Result<Path> {
    if start == goal {
        return Ok(Path {
            points: vec![start],
            total_distance: 0.0,
        });
    }

    let mut g_score: HashMap<Point, f64> = HashMap::new();
    let mut parents: HashMap<Point, Option<Point>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(AStarEntry::new(start, 0.0, start.distance_to(&goal)));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            return Ok(Path {
                points: reconstruct_path(&parents, start, goal),
                total_distance: current_score,
            });
        }

        let edges = graph
            .neighbours(&entry.node)
            .ok_or(Error::MalformedGraph { vertex: entry.node })?;

        for edge in edges {
            let next = edge.target;
            let tentative_g = current_score + edge.distance;
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                queue.push(AStarEntry::new(next, tentative_g, next.distance_to(&goal)));
            }
        }
    }

    Err(Error::Unreachable { start, goal })
}

fn reconstruct_path(
    parents: &HashMap<Point, Option<Point>>,
    start: Point,
    goal: Point,
) -> Vec<Point> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: Point,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: Point, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: Point,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: Point, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
