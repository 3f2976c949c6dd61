use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use log::debug;
use ndarray::{Array1, Array2};

use crate::config::TrainingConfig;
use crate::error::{BoundaryError, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::binary_classes;

/// Binary log-loss, as named by the gbdt crate.
const LOSS: &str = "LogLikelyhood";

/// Gradient Boosting Decision Tree (GBDT) classifier
pub struct GBDTClassifier {
    model: Option<GBDT>,
    params: TrainingConfig,
    feature_size: usize,
}

impl GBDTClassifier {
    pub fn new(params: TrainingConfig) -> Self {
        GBDTClassifier {
            model: None,
            params,
            feature_size: 0,
        }
    }

    /// Number of feature columns seen during `fit`.
    pub fn feature_size(&self) -> usize {
        self.feature_size
    }

    fn to_data_vec(x: &Array2<f64>, labels: Option<&Array1<i32>>) -> DataVec {
        let mut data = DataVec::with_capacity(x.nrows());
        for (i, row) in x.rows().into_iter().enumerate() {
            let features: Vec<ValueType> = row.iter().map(|&v| v as ValueType).collect();
            // LogLikelyhood works on the {-1, +1} label convention.
            let label = match labels {
                Some(y) if y[i] == 1 => 1.0,
                Some(_) => -1.0,
                None => 0.0,
            };
            data.push(Data::new_training_data(features, 1.0, label, None));
        }
        data
    }

    fn margins(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let model = self.model.as_ref().ok_or_else(|| {
            BoundaryError::Inference("predict called before the model was fitted".to_string())
        })?;
        if x.ncols() != self.feature_size {
            return Err(BoundaryError::Inference(format!(
                "model was fitted on {} features, query has {}",
                self.feature_size,
                x.ncols()
            )));
        }
        if x.nrows() == 0 {
            return Ok(Vec::new());
        }

        let test_x = Self::to_data_vec(x, None);
        let margins = model.decision_function(&test_x);
        if margins.len() != x.nrows() {
            return Err(BoundaryError::Inference(format!(
                "classifier returned {} predictions for {} rows",
                margins.len(),
                x.nrows()
            )));
        }
        Ok(margins.into_iter().map(f64::from).collect())
    }
}

/// Probability of the positive class for a LogLikelyhood margin `f`.
pub fn margin_to_probability(f: f64) -> f64 {
    (1.0 / (1.0 + (-2.0 * f).exp())).clamp(0.0, 1.0)
}

impl ClassifierModel for GBDTClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<i32>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(BoundaryError::Training(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        let classes = binary_classes(y)?;
        if classes != (0, 1) {
            return Err(BoundaryError::Training(format!(
                "labels must be 0 and 1, found {:?}",
                classes
            )));
        }

        let feature_size = x.ncols();
        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate() as ValueType);
        config.set_max_depth(self.params.max_depth());
        config.set_min_leaf_size(1);
        config.set_iterations(self.params.num_trees() as usize);
        config.set_debug(false);
        config.set_training_optimization_level(2);
        config.set_loss(LOSS);

        let mut gbdt = GBDT::new(&config);
        let mut train_x = Self::to_data_vec(x, Some(y));
        gbdt.fit(&mut train_x);

        self.model = Some(gbdt);
        self.feature_size = feature_size;

        if log::log_enabled!(log::Level::Debug) {
            let probs = self.predict_proba(x)?;
            let wrong = probs
                .iter()
                .zip(y.iter())
                .filter(|(p, label)| (**p >= 0.5) != (**label == 1))
                .count();
            debug!(
                "[gbdt.fit] {} rounds, training error {:.3}",
                self.params.num_trees(),
                wrong as f64 / y.len() as f64
            );
        }
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let margins = self.margins(x)?;
        Ok(margins.into_iter().map(margin_to_probability).collect())
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}
