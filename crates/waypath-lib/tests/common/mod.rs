//! Common test utilities and fixture helpers.
//!
//! Provides the small route networks used across integration tests, a
//! temporary route file helper, and a brute-force path search used as an
//! oracle for the solver.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use waypath_lib::{Graph, Point, Route};

#[allow(dead_code)]
pub fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Single L-shaped route: (0,0) -> (3,0) -> (3,4).
#[allow(dead_code)]
pub fn l_route() -> Vec<Route> {
    vec![vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 4.0)]]
}

/// Two components that share no points.
#[allow(dead_code)]
pub fn disjoint_routes() -> Vec<Route> {
    vec![
        vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)],
        vec![p(10.0, 10.0), p(11.0, 10.0)],
    ]
}

/// A square with one diagonal; the diagonal is the short way across.
#[allow(dead_code)]
pub fn square_with_diagonal() -> Vec<Route> {
    vec![
        vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0)],
        vec![p(0.0, 0.0), p(0.0, 4.0), p(4.0, 4.0)],
        vec![p(0.0, 0.0), p(4.0, 4.0)],
    ]
}

/// Deterministic pseudo-random routes over a small integer grid.
#[allow(dead_code)]
pub fn generated_routes(seed: u64, routes: usize, grid: u64) -> Vec<Route> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    (0..routes)
        .map(|_| {
            let len = 2 + next(3) as usize;
            (0..len)
                .map(|_| p(next(grid) as f64, next(grid) as f64))
                .collect()
        })
        .collect()
}

/// Minimum path weight between `start` and `goal` found by enumerating every
/// simple path. Only usable on tiny graphs.
#[allow(dead_code)]
pub fn brute_force_distance(graph: &Graph, start: Point, goal: Point) -> Option<f64> {
    fn walk(
        graph: &Graph,
        current: Point,
        goal: Point,
        cost: f64,
        visited: &mut HashSet<Point>,
        best: &mut Option<f64>,
    ) {
        if current == goal {
            if best.map_or(true, |b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        for edge in graph.neighbours(&current).unwrap_or(&[]) {
            if visited.insert(edge.target) {
                walk(graph, edge.target, goal, cost + edge.distance, visited, best);
                visited.remove(&edge.target);
            }
        }
    }

    let mut visited = HashSet::from([start]);
    let mut best = None;
    walk(graph, start, goal, 0.0, &mut visited, &mut best);
    best
}

/// Temporary directory holding a route file.
#[allow(dead_code)]
pub struct RouteFileEnv {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl RouteFileEnv {
    pub fn with_contents(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("points.txt");
        fs::write(&path, contents).expect("write route file");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}
