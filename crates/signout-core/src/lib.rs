//! signout-core — Hand-off model, normalization, and rubric scoring.
//!
//! This crate defines the hand-off data model, the text normalizer applied
//! at ingestion, the keyword rubric, the store trait, and the service that
//! ties them together.

pub mod cases;
pub mod error;
pub mod keywords;
pub mod model;
pub mod normalize;
pub mod rubric;
pub mod service;
pub mod traits;

pub use error::SignoutError;
pub use model::{HandoffRecord, HandoffSubmission, IllnessSeverity};
pub use rubric::{score, RubricResult, RUBRIC_VERSION};
