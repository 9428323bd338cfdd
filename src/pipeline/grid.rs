//! Time-series grid construction.
//!
//! The grid is the backbone of the trends chart: one row per
//! `(date, category)` for *every* calendar day in the active range and every
//! category present in the filtered data. Days without sales get explicit
//! zero rows; a line chart fed a sparse series would silently interpolate
//! over the gaps.
//!
//! Ordering is deterministic: ascending by date, then by category. Both
//! accumulators are `BTreeMap`s, so the output order falls out of iteration
//! order and needs no separate sort.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{FilterSpec, GridCell, GridRange, MergedRecord};

/// Resolve the grid's `[min_date, max_date]` per the caller's range policy.
///
/// Returns `None` when no usable range exists (no data under `Observed`, or
/// an unbounded side with no data to fall back on under `FilterBounds`);
/// the grid is then empty, which is not an error.
fn resolve_range(
    merged: &[MergedRecord],
    filter: &FilterSpec,
    range: GridRange,
) -> Option<(NaiveDate, NaiveDate)> {
    let observed_min = merged.iter().map(|m| m.date).min();
    let observed_max = merged.iter().map(|m| m.date).max();

    let (min_date, max_date) = match range {
        GridRange::Observed => (observed_min?, observed_max?),
        GridRange::FilterBounds => (
            filter.start_date.or(observed_min)?,
            filter.end_date.or(observed_max)?,
        ),
    };

    if min_date > max_date {
        return None;
    }
    Some((min_date, max_date))
}

/// Build the complete date × category grid with zero-filled gaps.
///
/// Steps: resolve the range, enumerate every day in it, collect the distinct
/// categories of the filtered data, aggregate actual daily sums, then walk
/// the full cartesian skeleton substituting zero for absent aggregates.
pub fn build_grid(
    merged: &[MergedRecord],
    filter: &FilterSpec,
    range: GridRange,
) -> Vec<GridCell> {
    let Some((min_date, max_date)) = resolve_range(merged, filter, range) else {
        debug!("degenerate range, emitting empty grid");
        return Vec::new();
    };

    let categories: BTreeSet<&str> = merged.iter().map(|m| m.category.as_str()).collect();

    // Actual daily aggregates. Revenue is the sum of per-row line revenues;
    // unit prices vary across rows, so quantity × average price would be
    // wrong here.
    let mut daily: BTreeMap<(NaiveDate, &str), (u64, f64)> = BTreeMap::new();
    for m in merged {
        let cell = daily.entry((m.date, m.category.as_str())).or_insert((0, 0.0));
        cell.0 += u64::from(m.quantity);
        cell.1 += m.line_revenue;
    }

    let mut grid = Vec::with_capacity(
        usize::try_from((max_date - min_date).num_days() + 1).unwrap_or(0) * categories.len(),
    );
    for date in min_date.iter_days().take_while(|d| *d <= max_date) {
        for category in categories.iter().copied() {
            let (quantity, revenue) = daily.get(&(date, category)).copied().unwrap_or((0, 0.0));
            grid.push(GridCell {
                date,
                category: category.to_string(),
                quantity,
                revenue,
            });
        }
    }

    debug!(
        rows = grid.len(),
        categories = categories.len(),
        %min_date,
        %max_date,
        "built time-series grid"
    );
    grid
}

/// Reshape the sorted grid into one ordered series per category, the form a
/// charting consumer wants. Pure regrouping; no values are recomputed.
pub fn series_by_category(grid: &[GridCell]) -> BTreeMap<String, Vec<GridCell>> {
    let mut series: BTreeMap<String, Vec<GridCell>> = BTreeMap::new();
    for cell in grid {
        series
            .entry(cell.category.clone())
            .or_default()
            .push(cell.clone());
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn merged(day: u32, category: &str, quantity: u32, unit_price: f64) -> MergedRecord {
        MergedRecord {
            date: d(day),
            customer_id: "C-001".to_string(),
            customer_name: "Customer C-001".to_string(),
            location: "Oslo".to_string(),
            product_id: "P-001".to_string(),
            product_name: "Product P-001".to_string(),
            category: category.to_string(),
            quantity,
            unit_price,
            line_revenue: f64::from(quantity) * unit_price,
        }
    }

    #[test]
    fn gaps_are_explicit_zero_rows() {
        // Sales on Jan 1 and Jan 3, nothing on Jan 2.
        let rows = vec![merged(1, "A", 2, 10.0), merged(3, "A", 1, 10.0)];
        let grid = build_grid(&rows, &FilterSpec::unrestricted(), GridRange::Observed);

        assert_eq!(grid.len(), 3);
        assert_eq!((grid[0].date, grid[0].quantity, grid[0].revenue), (d(1), 2, 20.0));
        assert_eq!((grid[1].date, grid[1].quantity, grid[1].revenue), (d(2), 0, 0.0));
        assert_eq!((grid[2].date, grid[2].quantity, grid[2].revenue), (d(3), 1, 10.0));
    }

    #[test]
    fn grid_is_complete_over_dates_and_categories() {
        let rows = vec![
            merged(1, "A", 1, 5.0),
            merged(4, "B", 2, 3.0),
            merged(2, "A", 1, 5.0),
        ];
        let grid = build_grid(&rows, &FilterSpec::unrestricted(), GridRange::Observed);

        // 4 days × 2 categories.
        assert_eq!(grid.len(), 8);

        // Sorted by date then category, no pair missing.
        let keys: Vec<(NaiveDate, &str)> =
            grid.iter().map(|c| (c.date, c.category.as_str())).collect();
        let mut expected = Vec::new();
        for day in 1..=4 {
            for cat in ["A", "B"] {
                expected.push((d(day), cat));
            }
        }
        assert_eq!(keys, expected);
    }

    #[test]
    fn revenue_sums_per_row_products() {
        // Same category and day, two different unit prices.
        let rows = vec![merged(1, "A", 2, 10.0), merged(1, "A", 1, 4.0)];
        let grid = build_grid(&rows, &FilterSpec::unrestricted(), GridRange::Observed);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].quantity, 3);
        assert!((grid[0].revenue - 24.0).abs() < 1e-9);
    }

    #[test]
    fn filter_bounds_extend_past_observed_data() {
        let rows = vec![merged(2, "A", 1, 10.0)];
        let filter = FilterSpec {
            start_date: Some(d(1)),
            end_date: Some(d(4)),
            categories: None,
        };
        let grid = build_grid(&rows, &filter, GridRange::FilterBounds);

        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0].quantity, 0);
        assert_eq!(grid[1].quantity, 1);
        assert_eq!(grid[3].quantity, 0);
    }

    #[test]
    fn filter_bounds_fall_back_to_observed_for_open_side() {
        let rows = vec![merged(2, "A", 1, 10.0), merged(3, "A", 1, 10.0)];
        let filter = FilterSpec {
            start_date: Some(d(1)),
            end_date: None,
            categories: None,
        };
        let grid = build_grid(&rows, &filter, GridRange::FilterBounds);

        // Jan 1 (filter) through Jan 3 (observed max).
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn empty_data_yields_empty_grid_not_panic() {
        let grid = build_grid(&[], &FilterSpec::unrestricted(), GridRange::Observed);
        assert!(grid.is_empty());

        // Inverted explicit bounds: also empty, also no panic.
        let filter = FilterSpec {
            start_date: Some(d(5)),
            end_date: Some(d(1)),
            categories: None,
        };
        let grid = build_grid(&[], &filter, GridRange::FilterBounds);
        assert!(grid.is_empty());
    }

    #[test]
    fn series_regroup_preserves_order_and_values() {
        let rows = vec![merged(1, "B", 1, 1.0), merged(2, "A", 2, 2.0)];
        let grid = build_grid(&rows, &FilterSpec::unrestricted(), GridRange::Observed);
        let series = series_by_category(&grid);

        assert_eq!(series.len(), 2);
        let a = &series["A"];
        assert_eq!(a.len(), 2);
        assert!(a[0].date < a[1].date);

        let total_cells: usize = series.values().map(Vec::len).sum();
        assert_eq!(total_cells, grid.len());
    }
}
