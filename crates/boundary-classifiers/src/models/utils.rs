use ndarray::Array1;

use crate::error::{BoundaryError, Result};

/// Check that `y` describes a fittable binary problem and return its two
/// classes in ascending order.
///
/// Both classes must appear at least once, which also means at least two
/// samples.
pub fn binary_classes(y: &Array1<i32>) -> Result<(i32, i32)> {
    let mut classes: Vec<i32> = y.to_vec();
    classes.sort_unstable();
    classes.dedup();

    match classes.as_slice() {
        [neg, pos] => Ok((*neg, *pos)),
        [] => Err(BoundaryError::Training(
            "no training points were provided".to_string(),
        )),
        [only] => Err(BoundaryError::Training(format!(
            "both classes must be present, but every training point has label {}",
            only
        ))),
        more => Err(BoundaryError::Training(format!(
            "binary classification expects exactly two labels, found {:?}",
            more
        ))),
    }
}

/// Smallest and largest value of a prediction vector, for logging.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
