//! Waypath CLI library.
//!
//! Command-line helpers for the waypath route planner: locating the route
//! file and formatting results.

pub mod config;
pub mod output;
