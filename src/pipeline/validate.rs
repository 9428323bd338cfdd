//! Referential validation of sales against master data.
//!
//! Design goals:
//! - **Tolerant**: bad rows are expected from upstream data skew; they are
//!   excluded, never coerced, and never abort the run
//! - **Observable**: every exclusion is tallied per reason so diagnostics
//!   can surface the drop counts
//! - **Idempotent**: re-validating the valid subset drops nothing further

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{Customer, Product, SaleRecord};

/// Per-reason counts of excluded sales rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropTally {
    /// `customer_id` did not resolve to a known customer.
    pub unknown_customer: usize,
    /// `product_id` did not resolve to a known product.
    pub unknown_product: usize,
    /// Unit price was NaN, infinite, or negative. The type system cannot
    /// rule these out for an `f64` column, so the validator does.
    pub bad_price: usize,
}

impl DropTally {
    pub fn total(&self) -> usize {
        self.unknown_customer + self.unknown_product + self.bad_price
    }
}

/// Validator output: the valid subset plus bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSales {
    pub sales: Vec<SaleRecord>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub drops: DropTally,
}

/// Partition sales into valid/invalid by membership test on both foreign
/// keys.
///
/// A record is valid only if both references resolve (and its price is a
/// usable number). The invalid remainder is excluded from all downstream
/// computation; the tally is the only trace it leaves.
pub fn validate_sales(
    customers: &[Customer],
    products: &[Product],
    sales: &[SaleRecord],
) -> ValidatedSales {
    let customer_ids: HashSet<&str> = customers.iter().map(|c| c.id.as_str()).collect();
    let product_ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();

    let rows_read = sales.len();
    let mut drops = DropTally::default();
    let mut valid = Vec::with_capacity(sales.len());

    for sale in sales {
        if !customer_ids.contains(sale.customer_id.as_str()) {
            drops.unknown_customer += 1;
            continue;
        }
        if !product_ids.contains(sale.product_id.as_str()) {
            drops.unknown_product += 1;
            continue;
        }
        if !sale.unit_price.is_finite() || sale.unit_price < 0.0 {
            drops.bad_price += 1;
            continue;
        }
        valid.push(sale.clone());
    }

    let rows_used = valid.len();
    if drops.total() > 0 {
        warn!(
            dropped = drops.total(),
            unknown_customer = drops.unknown_customer,
            unknown_product = drops.unknown_product,
            bad_price = drops.bad_price,
            "excluded sales rows with invalid references"
        );
    }
    debug!(rows_read, rows_used, "referential validation done");

    ValidatedSales {
        sales: valid,
        rows_read,
        rows_used,
        drops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {id}"),
            location: "Oslo".to_string(),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: "A".to_string(),
            price: 10.0,
        }
    }

    fn sale(customer_id: &str, product_id: &str, unit_price: f64) -> SaleRecord {
        SaleRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer_id: customer_id.to_string(),
            product_id: product_id.to_string(),
            quantity: 1,
            unit_price,
        }
    }

    #[test]
    fn drops_rows_with_unknown_references() {
        let customers = vec![customer("C-001")];
        let products = vec![product("P-001")];
        let sales = vec![
            sale("C-001", "P-001", 10.0),
            sale("C-999", "P-001", 10.0),
            sale("C-001", "P-999", 10.0),
        ];

        let out = validate_sales(&customers, &products, &sales);
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.rows_used, 1);
        assert_eq!(out.drops.unknown_customer, 1);
        assert_eq!(out.drops.unknown_product, 1);
        assert_eq!(out.drops.total(), 2);
        assert_eq!(out.sales[0].customer_id, "C-001");
    }

    #[test]
    fn drops_rows_with_unusable_prices() {
        let customers = vec![customer("C-001")];
        let products = vec![product("P-001")];
        let sales = vec![
            sale("C-001", "P-001", -1.0),
            sale("C-001", "P-001", f64::NAN),
            sale("C-001", "P-001", 0.0),
        ];

        let out = validate_sales(&customers, &products, &sales);
        assert_eq!(out.drops.bad_price, 2);
        // A free item (price 0) is a legitimate sale.
        assert_eq!(out.rows_used, 1);
    }

    #[test]
    fn revalidating_valid_subset_drops_nothing() {
        let customers = vec![customer("C-001"), customer("C-002")];
        let products = vec![product("P-001")];
        let sales = vec![
            sale("C-001", "P-001", 10.0),
            sale("C-404", "P-001", 10.0),
            sale("C-002", "P-404", 10.0),
        ];

        let first = validate_sales(&customers, &products, &sales);
        assert_eq!(first.drops.total(), 2);

        let second = validate_sales(&customers, &products, &first.sales);
        assert_eq!(second.drops.total(), 0);
        assert_eq!(second.sales, first.sales);
    }

    #[test]
    fn empty_sales_is_fine() {
        let out = validate_sales(&[customer("C-001")], &[product("P-001")], &[]);
        assert_eq!(out.rows_read, 0);
        assert_eq!(out.rows_used, 0);
        assert_eq!(out.drops.total(), 0);
    }
}
