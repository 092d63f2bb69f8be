//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the selection enums (`Period`, `ModelKind`) and the file layout they resolve to
//! - loaded data (`PredictionSeries`, `EvaluationMetrics`)
//! - the inclusive `DateRange` used by the filter

pub mod types;

pub use types::*;
