use std::fmt;

use serde::Serialize;

use crate::error::{BoundaryError, Result};

/// Names the classifier a request is routed to.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    GBDT,
    #[cfg(feature = "svm")]
    SVM,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The front end has always called the tree endpoint "XGBoost".
            ModelType::GBDT => write!(f, "XGBoost"),
            #[cfg(feature = "svm")]
            ModelType::SVM => write!(f, "SVM"),
        }
    }
}

/// Hyper-parameters of one boosted-tree fit.
///
/// Built once per request through [`TrainingConfig::new`], which range-checks
/// every field; there is no way to construct an out-of-range config.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfig {
    max_depth: u32,
    learning_rate: f64,
    num_trees: u32,
}

impl TrainingConfig {
    pub fn new(max_depth: i64, learning_rate: f64, num_trees: i64) -> Result<Self> {
        let max_depth = u32::try_from(max_depth)
            .ok()
            .filter(|&d| d >= 1)
            .ok_or_else(|| {
                BoundaryError::Validation(format!("maxDepth must be >= 1, got {}", max_depth))
            })?;
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(BoundaryError::Validation(format!(
                "learningRate must be a finite number > 0, got {}",
                learning_rate
            )));
        }
        let num_trees = u32::try_from(num_trees)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                BoundaryError::Validation(format!("numTrees must be >= 1, got {}", num_trees))
            })?;

        Ok(Self {
            max_depth,
            learning_rate,
            num_trees,
        })
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Number of boosting rounds.
    pub fn num_trees(&self) -> u32 {
        self.num_trees
    }
}

/// Solver settings of the linear SVM.
///
/// Requests never carry these; the hyperplane endpoint always fits with
/// [`SvmConfig::default`], which mirrors linfa's own defaults.
#[cfg(feature = "svm")]
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SvmConfig {
    eps: f64,
    c: (f64, f64),
}

#[cfg(feature = "svm")]
impl SvmConfig {
    /// `eps` is the solver tolerance, `c` the (positive, negative) class
    /// penalties.
    pub fn new(eps: f64, c: (f64, f64)) -> Result<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(BoundaryError::Validation(format!(
                "eps must be a finite number > 0, got {}",
                eps
            )));
        }
        let (c_pos, c_neg) = c;
        if !(c_pos.is_finite() && c_neg.is_finite() && c_pos > 0.0 && c_neg > 0.0) {
            return Err(BoundaryError::Validation(format!(
                "C weights must be finite numbers > 0, got ({}, {})",
                c_pos, c_neg
            )));
        }
        Ok(Self { eps, c })
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn c(&self) -> (f64, f64) {
        self.c
    }
}

#[cfg(feature = "svm")]
impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            eps: 1e-7,
            c: (1.0, 1.0),
        }
    }
}
