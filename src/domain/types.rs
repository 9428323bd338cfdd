//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory by the pipeline stages
//! - exchanged as a JSON snapshot (demos, fixtures)
//! - compared structurally in tests
//!
//! Every date in the system is a plain calendar date (`NaiveDate`); no
//! time-of-day component exists anywhere in the pipeline, so date comparison
//! and grid construction never need normalization.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A customer master-data row. Immutable within a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// City/branch label used by the by-location revenue view.
    pub location: String,
}

/// A product master-data row. Immutable within a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Current catalog unit price. Sales carry their own price at time of
    /// sale, which may diverge from this.
    pub price: f64,
}

/// A raw sales transaction row, as supplied by the source adapter.
///
/// `customer_id`/`product_id` are unchecked foreign keys until the
/// referential validator has seen them. Quantity is unsigned; a negative
/// quantity cannot be represented, so adapters must fail such rows rather
/// than clamp them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Unit price at time of sale.
    pub unit_price: f64,
}

impl SaleRecord {
    /// Per-row revenue: quantity × unit price.
    ///
    /// Every higher-level revenue figure is a sum of these per-row products,
    /// never quantity × average price.
    pub fn line_revenue(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// The three source tables handed to one pipeline invocation.
///
/// Supplied fresh on every run; nothing here persists across invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTables {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<SaleRecord>,
}

/// A sale widened with its customer and product attributes.
///
/// Only produced by the joiner, and only for sales that passed referential
/// validation, so every field is total (no options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub customer_id: String,
    pub customer_name: String,
    pub location: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// Computed as part of the join, not deferred.
    pub line_revenue: f64,
}

/// One cell of the complete date × category grid.
///
/// Cells exist for *every* date in the active range and every category in
/// the filtered data; a combination with no sales is an explicit zero row,
/// never a missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub category: String,
    pub quantity: u64,
    pub revenue: f64,
}

/// Caller-supplied date-range and category selections.
///
/// All fields optional: a missing bound means unbounded on that side, and a
/// missing or empty category set means no category restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower date bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end_date: Option<NaiveDate>,
    pub categories: Option<BTreeSet<String>>,
}

impl FilterSpec {
    /// An unrestricted filter (all dates, all categories).
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Whether `date` falls within the (possibly unbounded) date range.
    pub fn date_in_range(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Whether `category` passes the category selection.
    ///
    /// An absent or empty selection restricts nothing, mirroring the
    /// dashboard control, where clearing the dropdown shows everything.
    pub fn category_selected(&self, category: &str) -> bool {
        match &self.categories {
            Some(set) if !set.is_empty() => set.contains(category),
            _ => true,
        }
    }
}

/// Where the grid's date range comes from.
///
/// The source behavior was ambiguous (both variants appear in different call
/// paths), so the choice is an explicit parameter instead of an inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GridRange {
    /// Derive the range from the min/max dates observed in the filtered
    /// data.
    Observed,
    /// Prefer the explicit filter bound on each side; fall back to the
    /// observed bound for an unbounded side.
    FilterBounds,
}

/// Per-invocation pipeline policy: filters, grid range source, ranking
/// cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub filter: FilterSpec,
    pub grid_range: GridRange,
    /// How many locations the by-location ranking keeps.
    pub top_locations: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            filter: FilterSpec::unrestricted(),
            grid_range: GridRange::FilterBounds,
            top_locations: 5,
        }
    }
}
