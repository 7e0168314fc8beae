//! Reader for plain-text route descriptions.
//!
//! One route per line, written as comma-separated `(x, y)` tuples:
//!
//! ```text
//! # ring road
//! (0, 0), (3, 0), (3, 4)
//! (3, 4), (10, 4)
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Each tuple holds
//! exactly two plain Rust float literals: nested parentheses and digit
//! separators such as `1_000` are rejected with [`Error::RouteParse`].
//! `nan` and `inf` parse; such vertices never win nearest-point matching.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::point::{Point, Route};

/// Load routes from a file on disk.
pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    if !path.exists() {
        return Err(Error::RoutesNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let routes = parse_routes(&contents)?;
    info!(
        path = %path.display(),
        routes = routes.len(),
        points = routes.iter().map(Vec::len).sum::<usize>(),
        "loaded routes"
    );
    Ok(routes)
}

/// Parse route descriptions from text.
pub fn parse_routes(input: &str) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        routes.push(parse_route(trimmed, index + 1)?);
    }
    Ok(routes)
}

fn parse_route(line: &str, line_number: usize) -> Result<Route> {
    let fail = |message: String| Error::RouteParse {
        line: line_number,
        message,
    };

    let mut points = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let body = rest
            .strip_prefix('(')
            .ok_or_else(|| fail(format!("expected '(' before '{rest}'")))?;
        let close = body
            .find(')')
            .ok_or_else(|| fail("missing ')' after point".to_string()))?;
        let point: Point = body[..close]
            .parse()
            .map_err(|err: Error| fail(err.to_string()))?;
        points.push(point);

        rest = body[close + 1..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
        } else if !rest.is_empty() {
            return Err(fail(format!("expected ',' before '{rest}'")));
        }
    }
    Ok(points)
}
