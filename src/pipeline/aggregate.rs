//! Grouped views and scalar metrics over the filtered, merged dataset.
//!
//! Everything here is a fold over `MergedRecord`s into `BTreeMap`
//! accumulators keyed by the grouping attribute, then a deterministic
//! ordering pass. Revenue is always a sum of per-row line revenues.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Customer, MergedRecord, Product};

/// One row of the by-location revenue ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRevenue {
    pub location: String,
    pub quantity: u64,
    pub revenue: f64,
}

/// One row of the by-category revenue distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub quantity: u64,
    pub revenue: f64,
}

/// One row of the per-customer purchase pattern view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPattern {
    pub customer_id: String,
    pub quantity: u64,
    pub revenue: f64,
    /// `sum(line_revenue) / sum(quantity)`: a quantity-weighted figure, not
    /// a naive mean of unit prices. Zero when the group sold zero items.
    pub avg_spend_per_item: f64,
}

/// The three scalar metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line revenue over the filtered dataset.
    pub revenue: f64,
    /// Catalog size, counted over the unfiltered customer table.
    pub customers: usize,
    /// Catalog size, counted over the unfiltered product table.
    pub products: usize,
}

/// Top locations by revenue, descending; ties broken by location name
/// ascending so the ranking is stable across runs.
pub fn top_locations(merged: &[MergedRecord], n: usize) -> Vec<LocationRevenue> {
    let mut by_location: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for m in merged {
        let entry = by_location.entry(m.location.as_str()).or_insert((0, 0.0));
        entry.0 += u64::from(m.quantity);
        entry.1 += m.line_revenue;
    }

    let mut rows: Vec<LocationRevenue> = by_location
        .into_iter()
        .map(|(location, (quantity, revenue))| LocationRevenue {
            location: location.to_string(),
            quantity,
            revenue,
        })
        .collect();

    // BTreeMap already yields locations ascending; a stable sort on revenue
    // keeps that as the tie order.
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows.truncate(n);
    rows
}

/// Revenue and quantity per category, ascending by category name.
///
/// The revenue column sums to the global revenue scalar (modulo float
/// rounding), which is what makes it usable as a share-of-total view.
pub fn category_distribution(merged: &[MergedRecord]) -> Vec<CategoryRevenue> {
    let mut by_category: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for m in merged {
        let entry = by_category.entry(m.category.as_str()).or_insert((0, 0.0));
        entry.0 += u64::from(m.quantity);
        entry.1 += m.line_revenue;
    }

    by_category
        .into_iter()
        .map(|(category, (quantity, revenue))| CategoryRevenue {
            category: category.to_string(),
            quantity,
            revenue,
        })
        .collect()
}

/// Per-customer totals and average spend per item, ascending by customer id.
pub fn customer_patterns(merged: &[MergedRecord]) -> Vec<CustomerPattern> {
    let mut by_customer: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for m in merged {
        let entry = by_customer.entry(m.customer_id.as_str()).or_insert((0, 0.0));
        entry.0 += u64::from(m.quantity);
        entry.1 += m.line_revenue;
    }

    by_customer
        .into_iter()
        .map(|(customer_id, (quantity, revenue))| CustomerPattern {
            customer_id: customer_id.to_string(),
            quantity,
            revenue,
            // A customer whose rows all have quantity 0 has spent per item
            // nothing meaningful; report 0 rather than dividing by zero.
            avg_spend_per_item: if quantity == 0 {
                0.0
            } else {
                revenue / quantity as f64
            },
        })
        .collect()
}

/// The three scalars.
///
/// Revenue reflects the *filtered* dataset; the customer and product counts
/// deliberately reflect the unfiltered master tables: catalog size, not
/// activity in range.
pub fn compute_totals(
    merged: &[MergedRecord],
    customers: &[Customer],
    products: &[Product],
) -> Totals {
    Totals {
        revenue: merged.iter().map(|m| m.line_revenue).sum(),
        customers: customers.len(),
        products: products.len(),
    }
}

/// Sorted distinct categories of the unfiltered product table, used to
/// populate selection controls. Independent of any active filter.
pub fn category_options(products: &[Product]) -> Vec<String> {
    let set: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn merged(customer: &str, location: &str, category: &str, quantity: u32, price: f64) -> MergedRecord {
        MergedRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer_id: customer.to_string(),
            customer_name: format!("Customer {customer}"),
            location: location.to_string(),
            product_id: "P-001".to_string(),
            product_name: "Product P-001".to_string(),
            category: category.to_string(),
            quantity,
            unit_price: price,
            line_revenue: f64::from(quantity) * price,
        }
    }

    #[test]
    fn top_locations_ranked_by_revenue_then_name() {
        let rows = vec![
            merged("C-001", "Oslo", "A", 1, 50.0),
            merged("C-002", "Bergen", "A", 10, 2.0),
            // Tromso ties Oslo on revenue; alphabetical order breaks it.
            merged("C-003", "Tromso", "A", 5, 10.0),
            merged("C-004", "Oslo", "A", 0, 99.0),
        ];

        let top = top_locations(&rows, 5);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].location, "Oslo");
        assert_eq!(top[1].location, "Tromso");
        assert_eq!(top[2].location, "Bergen");

        let top2 = top_locations(&rows, 2);
        assert_eq!(top2.len(), 2);
        assert_eq!(top2[1].location, "Tromso");
    }

    #[test]
    fn category_distribution_conserves_revenue() {
        let rows = vec![
            merged("C-001", "Oslo", "A", 2, 10.0),
            merged("C-001", "Oslo", "B", 1, 7.0),
            merged("C-002", "Bergen", "A", 3, 9.0),
        ];

        let dist = category_distribution(&rows);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].category, "A");
        assert_eq!(dist[0].quantity, 5);

        let dist_total: f64 = dist.iter().map(|c| c.revenue).sum();
        let scalar = compute_totals(&rows, &[], &[]).revenue;
        assert!((dist_total - scalar).abs() < 1e-9);
    }

    #[test]
    fn customer_patterns_weight_by_quantity() {
        // 2 items at 10 and 1 item at 40: avg per item is 60/3 = 20,
        // not the naive price mean of 25.
        let rows = vec![
            merged("C-001", "Oslo", "A", 2, 10.0),
            merged("C-001", "Oslo", "A", 1, 40.0),
        ];

        let patterns = customer_patterns(&rows);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].quantity, 3);
        assert!((patterns[0].avg_spend_per_item - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_quantity_customer_does_not_divide_by_zero() {
        let rows = vec![merged("C-001", "Oslo", "A", 0, 10.0)];
        let patterns = customer_patterns(&rows);
        assert_eq!(patterns[0].quantity, 0);
        assert_eq!(patterns[0].avg_spend_per_item, 0.0);
    }

    #[test]
    fn totals_count_catalog_not_activity() {
        let customers = vec![
            Customer {
                id: "C-001".to_string(),
                name: "A".to_string(),
                location: "Oslo".to_string(),
            },
            Customer {
                id: "C-002".to_string(),
                name: "B".to_string(),
                location: "Bergen".to_string(),
            },
        ];
        let products = vec![Product {
            id: "P-001".to_string(),
            name: "X".to_string(),
            category: "A".to_string(),
            price: 1.0,
        }];

        // Only one customer is active, but the scalar reports both.
        let rows = vec![merged("C-001", "Oslo", "A", 1, 10.0)];
        let totals = compute_totals(&rows, &customers, &products);
        assert_eq!(totals.customers, 2);
        assert_eq!(totals.products, 1);
        assert!((totals.revenue - 10.0).abs() < 1e-12);
    }

    #[test]
    fn category_options_are_sorted_and_distinct() {
        let mk = |id: &str, cat: &str| Product {
            id: id.to_string(),
            name: id.to_string(),
            category: cat.to_string(),
            price: 1.0,
        };
        let products = vec![mk("P-1", "Toys"), mk("P-2", "Apparel"), mk("P-3", "Toys")];
        assert_eq!(category_options(&products), vec!["Apparel", "Toys"]);
    }
}
