//! One-request orchestration: validate, prepare, fit, infer, respond.
//!
//! Each call builds its own matrices and model and drops them on return.
//! Any failure aborts the request; the caller gets either a complete payload
//! or a single [`ErrorEnvelope`].
use log::{debug, error};
use ndarray::s;
use serde::{Deserialize, Serialize};

use crate::config::ModelType;
use crate::data_handling::{prepare_query_matrix, prepare_training_data};
use crate::error::{BoundaryError, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::gbdt::GBDTClassifier;
use crate::models::utils::value_range;
use crate::schema::{
    validate_gbdt_request, DecisionBoundaryPoint, DecisionBoundaryResponse, GbdtRequest,
};
#[cfg(feature = "svm")]
use crate::schema::{validate_svm_request, HyperplaneResult, SvmPoint};

/// Status code of every failed request.
pub const FAILURE_STATUS: u16 = 500;

/// Uniform failure payload.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub detail: String,
}

impl ErrorEnvelope {
    pub fn new(model: ModelType, err: &BoundaryError) -> Self {
        ErrorEnvelope {
            status_code: FAILURE_STATUS,
            detail: format!("Failed to process {} model: {}", model, err),
        }
    }
}

/// Train the boosted-tree classifier and score every boundary point.
pub fn run_gbdt(request: &GbdtRequest) -> Result<DecisionBoundaryResponse> {
    let training = prepare_training_data(&request.training_points)?;
    training.log_input_data_summary();

    let query = prepare_query_matrix(&request.boundary_points)?;
    debug!("boundary points shape: {:?}", query.dim());

    let mut model = GBDTClassifier::new(request.config);
    model.fit(&training.x, &training.y)?;

    // the trees only know (x, y); a 3D query is scored on its first two axes
    let query = query.slice(s![.., 0..2]).to_owned();
    let predictions = model.predict_proba(&query)?;
    if let Some((lo, hi)) = value_range(&predictions) {
        debug!("[{}] prediction range: {:.3} to {:.3}", model.name(), lo, hi);
    }

    let decision_boundary = request
        .boundary_points
        .iter()
        .zip(predictions)
        .map(|(point, prediction)| DecisionBoundaryPoint {
            x: point.coords[0],
            y: point.coords[1],
            prediction,
        })
        .collect();

    Ok(DecisionBoundaryResponse { decision_boundary })
}

/// Fit a linear SVM on the lifted points and return its hyperplane.
#[cfg(feature = "svm")]
pub fn run_svm(points: &[SvmPoint]) -> Result<HyperplaneResult> {
    use crate::config::SvmConfig;
    use crate::data_handling::prepare_svm_data;
    use crate::models::svm::LinearSvm;

    let (x, y) = prepare_svm_data(points)?;
    debug!("svm training shape: {:?}", x.dim());

    let svm = LinearSvm::fit(&x, &y, &SvmConfig::default())?;
    Ok(svm.hyperplane(&x))
}

/// Full tree-classifier pipeline on a raw request body.
pub fn handle_gbdt_request(raw: &[u8]) -> std::result::Result<DecisionBoundaryResponse, ErrorEnvelope> {
    validate_gbdt_request(raw)
        .and_then(|request| run_gbdt(&request))
        .map_err(|e| failure(ModelType::GBDT, e))
}

/// Full SVM pipeline on a raw request body.
#[cfg(feature = "svm")]
pub fn handle_svm_request(raw: &[u8]) -> std::result::Result<HyperplaneResult, ErrorEnvelope> {
    validate_svm_request(raw)
        .and_then(|points| run_svm(&points))
        .map_err(|e| failure(ModelType::SVM, e))
}

fn failure(model: ModelType, err: BoundaryError) -> ErrorEnvelope {
    error!("Error processing {} model during {}: {}", model, err.stage(), err);
    ErrorEnvelope::new(model, &err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_names_stage() {
        let env = ErrorEnvelope::new(
            ModelType::GBDT,
            &BoundaryError::Training("only one class".to_string()),
        );
        assert_eq!(env.status_code, 500);
        assert!(env.detail.starts_with("Failed to process XGBoost model: training failed"));
        assert!(env.detail.contains("only one class"));
    }

    #[test]
    fn malformed_body_gives_envelope() {
        let env = handle_gbdt_request(b"[]").unwrap_err();
        assert_eq!(env.status_code, FAILURE_STATUS);
        assert!(env.detail.contains("invalid request"));
    }

    #[test]
    fn envelope_serializes_status_code() {
        let env = ErrorEnvelope::new(ModelType::GBDT, &BoundaryError::Shape("x".to_string()));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["statusCode"], 500);
        assert!(json["detail"].as_str().unwrap().contains("inconsistent point shape"));
    }
}
