//! Integration tests for request validation and training configuration.

use boundary_classifiers::config::{ModelType, TrainingConfig};
use boundary_classifiers::data_handling::prepare_training_data;
use boundary_classifiers::schema::{validate_gbdt_request, validate_gbdt_value};
use boundary_classifiers::BoundaryError;
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "trainingPoints": [
            {"coords": {"x": 1.5, "y": -2.0}, "label": -1, "id": 41},
            {"coords": {"x": 3.0, "y": 4.0}, "label": 1, "id": 42}
        ],
        "boundaryPoints": [{"coords": [0.0, 0.0]}],
        "maxDepth": 4,
        "learningRate": 0.1,
        "numTrees": 20
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn config_fields_are_carried_into_request() {
    let req = validate_gbdt_value(valid_body()).unwrap();
    assert_eq!(req.config, TrainingConfig::new(4, 0.1, 20).unwrap());
}

#[test]
fn negative_depth_fails_before_training() {
    let mut body = valid_body();
    body["maxDepth"] = json!(-1);
    match validate_gbdt_value(body) {
        Err(BoundaryError::Validation(msg)) => assert!(msg.contains("maxDepth")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn string_where_number_expected_fails() {
    let mut body = valid_body();
    body["learningRate"] = json!("fast");
    assert!(matches!(
        validate_gbdt_value(body),
        Err(BoundaryError::Validation(_))
    ));
}

#[test]
fn missing_coordinate_fails() {
    let mut body = valid_body();
    body["trainingPoints"][0]["coords"] = json!({"x": 1.0});
    assert!(matches!(
        validate_gbdt_value(body),
        Err(BoundaryError::Validation(_))
    ));
}

#[test]
fn out_of_range_number_fails() {
    let raw = valid_body().to_string().replace("1.5", "1e400");
    assert!(matches!(
        validate_gbdt_request(raw.as_bytes()),
        Err(BoundaryError::Validation(_))
    ));
}

#[test]
fn normalization_keeps_ids_and_coordinates() {
    let req = validate_gbdt_value(valid_body()).unwrap();
    let set = prepare_training_data(&req.training_points).unwrap();
    assert_eq!(set.y.to_vec(), vec![0, 1]);
    assert_eq!(set.ids, vec![41, 42]);
    assert_eq!(set.x.row(0).to_vec(), vec![1.5, -2.0]);
    assert_eq!(req.training_points[0].label, -1);
}

// ---------------------------------------------------------------------------
// ModelType
// ---------------------------------------------------------------------------

#[test]
fn tree_model_keeps_front_end_name() {
    assert_eq!(ModelType::GBDT.to_string(), "XGBoost");
}
