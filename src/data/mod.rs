//! Data source adapters.
//!
//! - seeded synthetic snapshot generation (`sample`)
//! - snapshot JSON read/write (`snapshot`)
//!
//! These stand in for the production adapters (out of scope here) that pull
//! the three tables from wherever they live. Both produce/consume the same
//! in-memory `SourceTables` value the pipeline runs on.

pub mod sample;
pub mod snapshot;

pub use sample::*;
pub use snapshot::*;
