use linfa::traits::Fit;
use linfa::Dataset;
use linfa_svm::Svm;
use log::debug;
use ndarray::{Array1, Array2, Axis};

use crate::config::SvmConfig;
use crate::error::{BoundaryError, Result};
use crate::models::utils::binary_classes;
use crate::schema::{HyperplaneResult, Point3};

/// Dual coefficients at or below this magnitude belong to non-support vectors.
const SUPPORT_ALPHA_EPS: f64 = 1e-6;

/// Linear-kernel SVM fitted on a 3D training set, reduced to its hyperplane.
pub struct LinearSvm {
    support: Vec<usize>,
    normal: Array1<f64>,
    bias: f64,
}

impl LinearSvm {
    /// Fit on `x` (N×3). The larger of the two labels in `y` is the positive
    /// side of the plane.
    pub fn fit(x: &Array2<f64>, y: &Array1<i32>, params: &SvmConfig) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(BoundaryError::Training(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if x.ncols() != 3 {
            return Err(BoundaryError::Shape(format!(
                "expected 3 coordinates per point, got {}",
                x.ncols()
            )));
        }
        let (_, positive) = binary_classes(y)?;

        let targets = y.mapv(|l| l == positive);
        let dataset = Dataset::new(x.to_owned(), targets);
        let (c1, c2) = params.c();
        let model = Svm::<f64, bool>::params()
            .eps(params.eps())
            .pos_neg_weights(c1, c2)
            .linear_kernel()
            .fit(&dataset)
            .map_err(|e| BoundaryError::Training(e.to_string()))?;

        if model.alpha.len() != x.nrows() {
            return Err(BoundaryError::Inference(format!(
                "solver returned {} dual coefficients for {} points",
                model.alpha.len(),
                x.nrows()
            )));
        }

        // w = sum_i alpha_i x_i, with alpha signed by class
        let alpha = Array1::from_vec(model.alpha.clone());
        let normal = x.t().dot(&alpha);
        let bias = -model.rho;
        let support = alpha
            .iter()
            .enumerate()
            .filter(|(_, a)| a.abs() > SUPPORT_ALPHA_EPS)
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();

        debug!(
            "[svm.fit] {} points, {} support vectors, w = {}, b = {:.6}",
            x.nrows(),
            support.len(),
            normal,
            bias
        );

        Ok(LinearSvm {
            support,
            normal,
            bias,
        })
    }

    /// Indices of the support vectors in the training set, ascending.
    pub fn support_indices(&self) -> &[usize] {
        &self.support
    }

    pub fn normal_vector(&self) -> &Array1<f64> {
        &self.normal
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Signed distance-like score `w·x + b` for each row of `x`.
    pub fn decision_function(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.normal) + self.bias
    }

    /// Geometry in response form; support vectors are taken from `x`, the
    /// training matrix that was passed to [`LinearSvm::fit`].
    pub fn hyperplane(&self, x: &Array2<f64>) -> HyperplaneResult {
        debug_assert_eq!(self.normal.len(), 3);
        let support_vectors = x
            .select(Axis(0), &self.support)
            .rows()
            .into_iter()
            .map(|r| Point3 {
                x: r[0],
                y: r[1],
                z: r[2],
            })
            .collect();

        HyperplaneResult {
            support_vectors,
            normal_vector: Point3 {
                x: self.normal[0],
                y: self.normal[1],
                z: self.normal[2],
            },
            bias: self.bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Array2<f64>, Array1<i32>) {
        let x = Array2::from_shape_vec(
            (6, 3),
            vec![
                -1.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, //
                -2.0, 0.5, 0.0, //
                2.0, 0.0, 0.0, //
                3.0, 0.0, 0.0, //
                4.0, -0.5, 0.0,
            ],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0, 0, 0, 1, 1, 1]);
        (x, y)
    }

    #[test]
    fn test_svm_classifier() {
        let (x, y) = separable();
        let svm = LinearSvm::fit(&x, &y, &SvmConfig::default()).unwrap();

        assert!(!svm.support_indices().is_empty());
        let scores = svm.decision_function(&x);
        for (s, &label) in scores.iter().zip(y.iter()) {
            if label == 1 {
                assert!(*s > 0.0, "positive class on positive side, got {}", s);
            } else {
                assert!(*s < 0.0, "negative class on negative side, got {}", s);
            }
        }
        for &i in svm.support_indices() {
            assert!((scores[i].abs() - 1.0).abs() < 1e-2, "margin {}", scores[i]);
        }
    }

    #[test]
    fn hyperplane_reports_support_rows() {
        let (x, y) = separable();
        let svm = LinearSvm::fit(&x, &y, &SvmConfig::default()).unwrap();
        let hp = svm.hyperplane(&x);
        assert_eq!(hp.support_vectors.len(), svm.support_indices().len());
        assert!(hp.normal_vector.x > 0.0);
        assert!((hp.bias - svm.bias()).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_a_training_error() {
        let x = Array2::zeros((3, 3));
        let y = Array1::from_vec(vec![1, 1, 1]);
        assert!(matches!(
            LinearSvm::fit(&x, &y, &SvmConfig::default()),
            Err(BoundaryError::Training(_))
        ));
    }
}
