use std::fmt::Write;

use serde::Serialize;

use crate::graph::Graph;
use crate::point::{Point, Segment};
use crate::routing::{RouteAlgorithm, RoutePlan};
use crate::spatial::Snap;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header, numbered steps and connectors.
    PlainText,
    /// Single line of points joined by arrows.
    Basic,
    /// Markdown bullet list.
    Markdown,
}

/// One end of a planned route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RouteEndpoint {
    /// Point supplied by the caller.
    pub query: Point,
    /// Graph vertex the route actually starts or ends at.
    pub vertex: Point,
    /// True when `query` was not a vertex and had to be moved.
    pub snapped: bool,
    /// Length of the connector; zero when not snapped.
    pub connector_distance: f64,
}

impl From<&Snap> for RouteEndpoint {
    fn from(snap: &Snap) -> Self {
        Self {
            query: snap.query,
            vertex: snap.vertex,
            snapped: !snap.is_exact(),
            connector_distance: snap.distance,
        }
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub point: Point,
    /// Distance from the previous step; `None` for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Structured representation of a planned route that renderers can consume.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub total_distance: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    pub connectors: Vec<Segment>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with per-step distances.
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let mut previous: Option<Point> = None;
        let steps = plan
            .path
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let distance = previous.map(|prev| prev.distance_to(point));
                previous = Some(*point);
                RouteStep {
                    index,
                    point: *point,
                    distance,
                }
            })
            .collect();

        Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            total_distance: plan.total_distance(),
            start: RouteEndpoint::from(&plan.start),
            goal: RouteEndpoint::from(&plan.goal),
            steps,
            connectors: plan.connectors(),
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
            RouteRenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, distance {:.3}, algorithm: {})",
            self.start.query, self.goal.query, self.hops, self.total_distance, self.algorithm
        );

        if self.start.snapped {
            let _ = writeln!(
                buffer,
                "  start {} snapped to {} ({:.3} away)",
                self.start.query, self.start.vertex, self.start.connector_distance
            );
        }

        for step in &self.steps {
            match step.distance {
                Some(distance) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} (+{:.3})",
                        step.index, step.point, distance
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.point);
                }
            }
        }

        if self.goal.snapped {
            let _ = writeln!(
                buffer,
                "  goal {} snapped to {} ({:.3} away)",
                self.goal.query, self.goal.vertex, self.goal.connector_distance
            );
        }

        buffer
    }

    fn render_basic(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.point.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined}\n")
    }

    fn render_markdown(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** — _{} → {}_ ({} hops, distance {:.3}, algorithm: `{}`)",
            self.start.query, self.goal.query, self.hops, self.total_distance, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "* {:>2}. `{}`", step.index, step.point);
        }
        for connector in &self.connectors {
            let _ = writeln!(
                buffer,
                "* connector `{}` → `{}` ({:.3})",
                connector.from,
                connector.to,
                connector.length()
            );
        }
        buffer
    }
}

/// Vertex enumeration of a graph for renderers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub points: Vec<Point>,
}

impl GraphSummary {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            points: graph.vertices().to_vec(),
        }
    }
}
