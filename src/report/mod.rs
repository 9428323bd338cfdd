//! Terminal reporting.
//!
//! Formatting only: every number printed here was computed by the
//! pipeline. Keeping it in one place means output changes are localized
//! (important for future snapshot tests) and the pipeline stays clean.

pub mod format;

pub use format::*;
