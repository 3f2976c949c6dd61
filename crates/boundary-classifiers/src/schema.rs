//! Request and response payloads, and the validation step that turns raw
//! JSON into typed requests.
//!
//! Field names follow the front end's camelCase contract. Validation runs
//! before any model code: a request that fails here never reaches a
//! classifier.
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::TrainingConfig;
use crate::error::{BoundaryError, Result};

/// Label marking a point the user has not classified yet.
pub const UNLABELED: i32 = -1;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A labeled 2D point of the tree classifier's training set.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrainingPoint {
    pub coords: Coords,
    /// `0`, `1`, or [`UNLABELED`].
    pub label: i32,
    /// Opaque caller identifier, carried along but never interpreted.
    pub id: i64,
}

/// A query location, 2D or 3D.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BoundaryPoint {
    pub coords: Vec<f64>,
}

impl BoundaryPoint {
    pub fn dim(&self) -> usize {
        self.coords.len()
    }
}

/// A labeled point in the lifted 3D space of the SVM view.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SvmPoint {
    #[serde(rename = "transformedCoords")]
    pub transformed_coords: Point3,
    pub label: i32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GbdtRequestBody {
    training_points: Vec<TrainingPoint>,
    boundary_points: Vec<BoundaryPoint>,
    #[serde(deserialize_with = "integral")]
    max_depth: i64,
    learning_rate: f64,
    #[serde(deserialize_with = "integral")]
    num_trees: i64,
}

/// Accepts `3` as well as `3.0`; a fractional value is an error.
fn integral<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(de::Error::custom(format!("expected an integer, got {}", n))),
    }
}

/// Validated body of the tree-classifier endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GbdtRequest {
    pub training_points: Vec<TrainingPoint>,
    pub boundary_points: Vec<BoundaryPoint>,
    pub config: TrainingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DecisionBoundaryPoint {
    pub x: f64,
    pub y: f64,
    /// Raw probability of class `1`, never thresholded.
    pub prediction: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionBoundaryResponse {
    pub decision_boundary: Vec<DecisionBoundaryPoint>,
}

/// Separating plane `w·x + b = 0` of a linear SVM, with its support vectors.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HyperplaneResult {
    pub support_vectors: Vec<Point3>,
    pub normal_vector: Point3,
    pub bias: f64,
}

/// Parse and check the body of the tree-classifier endpoint.
pub fn validate_gbdt_request(raw: &[u8]) -> Result<GbdtRequest> {
    let body: GbdtRequestBody = parse(raw)?;
    gbdt_request_from_body(body)
}

/// Same as [`validate_gbdt_request`] for an already-parsed JSON value.
pub fn validate_gbdt_value(value: serde_json::Value) -> Result<GbdtRequest> {
    let body: GbdtRequestBody = serde_json::from_value(value)
        .map_err(|e| BoundaryError::Validation(e.to_string()))?;
    gbdt_request_from_body(body)
}

/// Parse and check the body of the SVM endpoint (a bare array of points).
pub fn validate_svm_request(raw: &[u8]) -> Result<Vec<SvmPoint>> {
    let points: Vec<SvmPoint> = parse(raw)?;
    for (i, p) in points.iter().enumerate() {
        let c = &p.transformed_coords;
        check_finite(&[c.x, c.y, c.z], || format!("points[{}].transformedCoords", i))?;
    }
    Ok(points)
}

fn parse<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).map_err(|e| BoundaryError::Validation(e.to_string()))
}

fn gbdt_request_from_body(body: GbdtRequestBody) -> Result<GbdtRequest> {
    let config = TrainingConfig::new(body.max_depth, body.learning_rate, body.num_trees)?;

    for (i, p) in body.training_points.iter().enumerate() {
        check_finite(&[p.coords.x, p.coords.y], || format!("trainingPoints[{}].coords", i))?;
        if !matches!(p.label, 0 | 1 | UNLABELED) {
            return Err(BoundaryError::Validation(format!(
                "trainingPoints[{}].label must be 0, 1 or -1, got {}",
                i, p.label
            )));
        }
    }

    for (i, p) in body.boundary_points.iter().enumerate() {
        if !(2..=3).contains(&p.dim()) {
            return Err(BoundaryError::Validation(format!(
                "boundaryPoints[{}].coords must have 2 or 3 values, got {}",
                i,
                p.dim()
            )));
        }
        check_finite(&p.coords, || format!("boundaryPoints[{}].coords", i))?;
    }

    Ok(GbdtRequest {
        training_points: body.training_points,
        boundary_points: body.boundary_points,
        config,
    })
}

fn check_finite(values: &[f64], field: impl FnOnce() -> String) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(BoundaryError::Validation(format!(
            "{} must contain finite numbers",
            field()
        )))
    }
}
