//! Route planning strategies.
//!
//! Each algorithm is wrapped in a planner implementing [`RoutePlanner`], so
//! `plan_route` can dispatch on the requested algorithm without knowing how
//! the search works.

use crate::error::Result;
use crate::graph::Graph;
use crate::path::{shortest_path, shortest_path_a_star, Path};
use crate::point::Point;

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Find a minimum-weight path between two graph vertices.
    fn find_path(&self, graph: &Graph, start: Point, goal: Point) -> Result<Path>;
}

/// Dijkstra's algorithm planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: Point, goal: Point) -> Result<Path> {
        shortest_path(graph, start, goal)
    }
}

/// A* planner guided by straight-line distance to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &Graph, start: Point, goal: Point) -> Result<Path> {
        shortest_path_a_star(graph, start, goal)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        assert_eq!(DijkstraPlanner.algorithm(), RouteAlgorithm::Dijkstra);
    }

    #[test]
    fn astar_planner_returns_correct_algorithm() {
        assert_eq!(AStarPlanner.algorithm(), RouteAlgorithm::AStar);
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }
}
