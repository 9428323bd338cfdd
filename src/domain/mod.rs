//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the three source tables (`Customer`, `Product`, `SaleRecord`)
//! - joined/derived rows (`MergedRecord`, `GridCell`)
//! - caller-supplied policy (`FilterSpec`, `GridRange`, `PipelineOptions`)

pub mod types;

pub use types::*;
