//! boundary-classifiers: model wrappers and the request pipeline behind the
//! decision-boundary playground.
//!
//! A request is validated into typed points (`schema`), reshaped into feature
//! matrices (`data_handling`), fitted with an off-the-shelf classifier
//! (`models`), and turned back into a response payload (`handler`). Nothing
//! is cached between requests; every model lives for one call.
//!
//! The linear SVM path needs `linfa` and sits behind the default `svm` feature.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod handler;
pub mod models;
pub mod schema;

pub use error::{BoundaryError, Result};
