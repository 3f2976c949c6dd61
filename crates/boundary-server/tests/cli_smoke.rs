//! CLI binary smoke tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("boundary").unwrap()
}

const TREE_REQUEST: &str = r#"{
    "trainingPoints": [
        {"coords": {"x": 0, "y": 0}, "label": 0, "id": 1},
        {"coords": {"x": 10, "y": 10}, "label": 1, "id": 2}
    ],
    "boundaryPoints": [{"coords": [0, 0]}],
    "maxDepth": 3,
    "learningRate": 0.3,
    "numTrees": 10
}"#;

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("predict"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boundary"));
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[test]
fn predict_writes_decision_boundary_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    std::fs::write(&path, TREE_REQUEST).unwrap();

    cmd()
        .arg("predict")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("decisionBoundary"))
        .stdout(predicate::str::contains("prediction"));
}

#[test]
fn predict_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let output = dir.path().join("response.json");
    std::fs::write(&input, TREE_REQUEST).unwrap();

    cmd()
        .arg("predict")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["decisionBoundary"].as_array().unwrap().len(), 1);
}

#[test]
fn predict_invalid_request_fails_with_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    std::fs::write(&path, "{\"trainingPoints\": []}").unwrap();

    cmd()
        .arg("predict")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("statusCode"))
        .stderr(predicate::str::contains("invalid request"));
}

#[test]
fn predict_missing_file_fails() {
    cmd()
        .args(["predict", "/nonexistent/request.json"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// hyperplane
// ---------------------------------------------------------------------------

#[cfg(feature = "svm")]
#[test]
fn hyperplane_prints_normal_vector() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.json");
    std::fs::write(
        &path,
        r#"[
            {"transformedCoords": {"x": 0, "y": 0, "z": 0}, "label": -1},
            {"transformedCoords": {"x": 0, "y": 0, "z": 2}, "label": 1}
        ]"#,
    )
    .unwrap();

    cmd()
        .arg("hyperplane")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("normalVector"))
        .stdout(predicate::str::contains("supportVectors"));
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

#[test]
fn serve_rejects_unreadable_config() {
    cmd()
        .args(["serve", "/nonexistent/server.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn serve_rejects_zero_workers() {
    cmd()
        .args(["serve", "--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}
