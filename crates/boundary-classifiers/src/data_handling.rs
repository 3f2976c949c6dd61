//! Conversion of request points into the feature matrices fed to the
//! classifiers.
//!
//! Row `i` of every matrix built here is point `i` of the input slice. Callers
//! re-associate predictions with points by position, so the order must never
//! change.
use ndarray::{Array1, Array2};

use crate::error::{BoundaryError, Result};
use crate::schema::{BoundaryPoint, SvmPoint, TrainingPoint, UNLABELED};

/// Training set of the tree classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    /// N×2 features, columns `x`, `y`.
    pub x: Array2<f64>,
    /// Effective labels, `0` or `1`.
    pub y: Array1<i32>,
    /// Caller ids, aligned with the rows of `x`.
    pub ids: Vec<i64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn log_input_data_summary(&self) {
        log::debug!(
            "training set: shape {:?}, {} points labeled 0, {} labeled 1",
            self.x.dim(),
            self.y.iter().filter(|&&v| v == 0).count(),
            self.y.iter().filter(|&&v| v == 1).count()
        );
    }
}

/// Label used for fitting: unlabeled points count as class `0`.
pub fn effective_label(label: i32) -> i32 {
    if label == UNLABELED {
        0
    } else {
        label
    }
}

/// Build the feature matrix and label vector of the tree classifier.
///
/// Only the label fed to the fit is altered; coordinates and ids are copied
/// through unchanged.
pub fn prepare_training_data(points: &[TrainingPoint]) -> Result<TrainingSet> {
    let mut data = Vec::with_capacity(points.len() * 2);
    let mut labels = Vec::with_capacity(points.len());
    let mut ids = Vec::with_capacity(points.len());

    for p in points {
        data.push(p.coords.x);
        data.push(p.coords.y);
        labels.push(effective_label(p.label));
        ids.push(p.id);
    }

    let x = Array2::from_shape_vec((points.len(), 2), data)
        .map_err(|e| BoundaryError::Shape(e.to_string()))?;

    Ok(TrainingSet {
        x,
        y: Array1::from_vec(labels),
        ids,
    })
}

/// Build the query matrix of a set of boundary points.
///
/// The width is the dimensionality of the points (2 or 3). An empty set gives
/// a `0×2` matrix.
pub fn prepare_query_matrix(points: &[BoundaryPoint]) -> Result<Array2<f64>> {
    let dim = points.first().map_or(2, BoundaryPoint::dim);

    let mut data = Vec::with_capacity(points.len() * dim);
    for (i, p) in points.iter().enumerate() {
        if p.dim() != dim {
            return Err(BoundaryError::Shape(format!(
                "boundary point {} has {} coordinates, expected {} like the first point",
                i,
                p.dim(),
                dim
            )));
        }
        data.extend_from_slice(&p.coords);
    }

    Array2::from_shape_vec((points.len(), dim), data)
        .map_err(|e| BoundaryError::Shape(e.to_string()))
}

/// Build the N×3 feature matrix and raw label vector of the SVM view.
///
/// Labels are passed through as given; the SVM path has no unlabeled class.
pub fn prepare_svm_data(points: &[SvmPoint]) -> Result<(Array2<f64>, Array1<i32>)> {
    let mut data = Vec::with_capacity(points.len() * 3);
    for p in points {
        let c = &p.transformed_coords;
        data.extend_from_slice(&[c.x, c.y, c.z]);
    }
    let x = Array2::from_shape_vec((points.len(), 3), data)
        .map_err(|e| BoundaryError::Shape(e.to_string()))?;
    let y = points.iter().map(|p| p.label).collect::<Array1<i32>>();
    Ok((x, y))
}
