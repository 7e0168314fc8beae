//! Output formatting for CLI results.
//!
//! Text renderings delegate to the library's [`RouteSummary::render`]; JSON
//! is written with `serde_json` so other tools can consume the result.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use waypath_lib::{GraphSummary, RouteRenderMode, RouteSummary, Snap};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header, numbered steps and snapping notes.
    #[default]
    Text,
    /// Points joined by arrows on a single line.
    Basic,
    /// Markdown list.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> Option<RouteRenderMode> {
        match self {
            OutputFormat::Text => Some(RouteRenderMode::PlainText),
            OutputFormat::Basic => Some(RouteRenderMode::Basic),
            OutputFormat::Markdown => Some(RouteRenderMode::Markdown),
            OutputFormat::Json => None,
        }
    }
}

/// Render a route summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format.render_mode() {
        Some(mode) => {
            print!("{}", summary.render(mode));
            Ok(())
        }
        None => render_json(summary),
    }
}

/// Render the result of snapping a single point.
pub fn render_snap(snap: &Snap, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(snap),
        OutputFormat::Basic => {
            println!("{}", snap.vertex);
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            if snap.is_exact() {
                println!("{} is a graph vertex", snap.query);
            } else {
                println!(
                    "{} snaps to {} ({:.3} away)",
                    snap.query, snap.vertex, snap.distance
                );
            }
            Ok(())
        }
    }
}

/// Render vertex and edge counts, plus the vertex list for JSON.
pub fn render_graph(summary: &GraphSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(summary),
        OutputFormat::Basic => {
            for point in &summary.points {
                println!("{point}");
            }
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            println!(
                "Graph: {} vertices, {} edges",
                summary.vertices, summary.edges
            );
            Ok(())
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_json_lacks_a_text_mode() {
        assert_eq!(
            OutputFormat::Text.render_mode(),
            Some(RouteRenderMode::PlainText)
        );
        assert_eq!(OutputFormat::Basic.render_mode(), Some(RouteRenderMode::Basic));
        assert_eq!(OutputFormat::Json.render_mode(), None);
    }

    #[test]
    fn value_names_are_lowercase() {
        let parsed = OutputFormat::from_str("markdown", true).expect("known format");
        assert_eq!(parsed, OutputFormat::Markdown);
        assert!(OutputFormat::from_str("xml", true).is_err());
    }
}
