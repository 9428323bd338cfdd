//! The reconciliation and aggregation pipeline.
//!
//! One invocation is a single pass over freshly supplied tables:
//!
//! validate -> date filter -> join -> category filter -> {grid, aggregates}
//!
//! Every stage is a pure function of its inputs; the run either completes
//! with a full [`DashboardData`] or fails atomically with a fatal error;
//! there are no partial results. The grid and aggregate branches consume the
//! same immutable merged dataset, so they are evaluated on parallel rayon
//! branches; that is an optimization, not something correctness relies on.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{GridCell, PipelineOptions, SourceTables};
use crate::error::PulseError;

pub mod aggregate;
pub mod filter;
pub mod grid;
pub mod join;
pub mod validate;

pub use aggregate::{CategoryRevenue, CustomerPattern, LocationRevenue, Totals};
pub use grid::series_by_category;
pub use validate::{DropTally, ValidatedSales};

/// All computed outputs of a single pipeline invocation.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Freshness indicator supplied by the caller; opaque to the pipeline.
    pub refreshed_at: DateTime<Utc>,

    /// Sales rows seen before validation.
    pub rows_read: usize,
    /// Sales rows that survived validation.
    pub rows_used: usize,
    /// Per-reason exclusion counts (diagnostics, never fatal).
    pub drops: DropTally,

    /// Complete date × category grid, sorted by date then category.
    pub grid: Vec<GridCell>,
    /// Top locations by revenue (descending, ties by name).
    pub top_locations: Vec<LocationRevenue>,
    /// Revenue/quantity per category, ascending by category.
    pub category_distribution: Vec<CategoryRevenue>,
    /// Per-customer quantity and average spend per item.
    pub customer_patterns: Vec<CustomerPattern>,
    /// Global scalars (filtered revenue, catalog counts).
    pub totals: Totals,
    /// Sorted distinct categories of the full product table, for filter
    /// controls.
    pub category_options: Vec<String>,
}

/// Run the full pipeline over one set of source tables.
///
/// `refreshed_at` is passed through untouched so the boundary can display
/// when the data was computed.
pub fn run(
    tables: &SourceTables,
    options: &PipelineOptions,
    refreshed_at: DateTime<Utc>,
) -> Result<DashboardData, PulseError> {
    debug!(
        customers = tables.customers.len(),
        products = tables.products.len(),
        sales = tables.sales.len(),
        "pipeline run started"
    );

    let validated = validate::validate_sales(&tables.customers, &tables.products, &tables.sales);

    let dated = filter::filter_sales_by_date(validated.sales, &options.filter);
    let joined = join::join_sales(&dated, &tables.customers, &tables.products)?;
    let merged = filter::filter_merged_by_category(joined, &options.filter);
    debug!(rows = merged.len(), "merged dataset ready");

    // Independent branches over the same immutable dataset.
    let (grid, (top, dist, patterns)) = rayon::join(
        || grid::build_grid(&merged, &options.filter, options.grid_range),
        || {
            (
                aggregate::top_locations(&merged, options.top_locations),
                aggregate::category_distribution(&merged),
                aggregate::customer_patterns(&merged),
            )
        },
    );

    let totals = aggregate::compute_totals(&merged, &tables.customers, &tables.products);
    let category_options = aggregate::category_options(&tables.products);

    Ok(DashboardData {
        refreshed_at,
        rows_read: validated.rows_read,
        rows_used: validated.rows_used,
        drops: validated.drops,
        grid,
        top_locations: top,
        category_distribution: dist,
        customer_patterns: patterns,
        totals,
        category_options,
    })
}
