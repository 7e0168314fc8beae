use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const ROUTES: &str = "\
# L-shaped road with a spur
(0, 0), (3, 0), (3, 4)
(3, 0), (8, 0)
# island
(20, 20), (21, 20)
";

fn cli() -> Command {
    cargo_bin_cmd!("waypath")
}

fn write_routes() -> (PathBuf, TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("points.txt");
    fs::write(&path, ROUTES).expect("write routes");
    (path, temp_dir)
}

fn prepare_command() -> (Command, TempDir) {
    let (path, temp_dir) = write_routes();
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env_remove("WAYPATH_ROUTES")
        .arg("--routes")
        .arg(path);
    (cmd, temp_dir)
}

#[test]
fn route_between_vertices_prints_steps() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "0,0", "--to", "3,4"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"))
        .stdout(predicate::str::contains("distance 7.000"))
        .stdout(predicate::str::contains("  1: (3, 0) (+3.000)"));
}

#[test]
fn off_graph_points_are_snapped() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "-1,-1", "--to", "9,0.5"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("start (-1, -1) snapped to (0, 0)"))
        .stdout(predicate::str::contains("goal (9, 0.5) snapped to (8, 0)"));
}

#[test]
fn basic_format_outputs_minimal_path() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "basic", "route", "--from", "0,0", "--to", "8,0"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("(0, 0) -> (3, 0) -> (8, 0)\n"));
}

#[test]
fn a_star_algorithm_is_supported() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "route",
        "--from",
        "0,0",
        "--to",
        "3,4",
        "--algorithm",
        "a-star",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: a-star"));
}

#[test]
fn json_output_is_parseable() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "0,0", "--to", "3,4"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["hops"], 2);
    assert_eq!(value["total_distance"], 7.0);
    assert_eq!(value["connectors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn unreachable_goal_fails() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "0,0", "--to", "20,20"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no route found"));
}

#[test]
fn invalid_point_is_rejected() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "zero", "--to", "3,4"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid point"));
}

#[test]
fn routes_can_come_from_environment() {
    let (path, _temp) = write_routes();
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env("WAYPATH_ROUTES", &path)
        .args(["snap", "--point", "2.9,3.8"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(2.9, 3.8) snaps to (3, 4)"));
}

#[test]
fn missing_route_file_is_an_error() {
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env_remove("WAYPATH_ROUTES")
        .args(["--routes", "/no/such/points.txt", "graph"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("route file not found"));
}

#[test]
fn no_route_file_at_all_is_an_error() {
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env_remove("WAYPATH_ROUTES")
        .arg("graph");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("WAYPATH_ROUTES"));
}

#[test]
fn graph_command_reports_counts() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("graph");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Graph: 6 vertices, 4 edges"));
}

#[test]
fn snap_on_vertex_is_exact() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["snap", "--point", "8,0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(8, 0) is a graph vertex"));
}
