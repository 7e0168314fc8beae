use std::path::PathBuf;

use thiserror::Error;

use crate::point::Point;

/// Convenient result alias for the waypath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when nearest-point matching is asked to choose from zero candidates.
    #[error("cannot snap to a graph with no vertices")]
    EmptyInput,

    /// Raised when the solver dequeues a vertex that has no adjacency entry.
    ///
    /// Graphs produced by [`crate::build_graph`] never trigger this; it signals a
    /// graph assembled by hand with dangling neighbour references.
    #[error("malformed graph: vertex {vertex} is referenced but has no adjacency entry")]
    MalformedGraph { vertex: Point },

    /// Raised when no path connects the requested vertices.
    #[error("no route found between {start} and {goal}")]
    Unreachable { start: Point, goal: Point },

    /// Raised when a route description line cannot be parsed.
    #[error("invalid route on line {line}: {message}")]
    RouteParse { line: usize, message: String },

    /// Raised when a point literal such as `3,4` cannot be parsed.
    #[error("invalid point '{input}': expected two comma-separated numbers")]
    InvalidPoint { input: String },

    /// Raised when a route file does not exist at the resolved path.
    #[error("route file not found at {path}")]
    RoutesNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
