pub mod gbdt;
#[cfg(feature = "svm")]
pub mod svm;
pub mod utils;

pub mod classifier_trait;
