use ndarray::{Array1, Array2};

use crate::error::Result;

/// A small trait abstraction over the probability-producing classifiers.
///
/// Implementations are built fresh for every request and dropped with it.
pub trait ClassifierModel {
    /// Fit the model. `y` holds the binary classes `0` and `1`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<i32>) -> Result<()>;

    /// Probability of class `1` for every row of `x`, in row order.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
