//! Join of sales against both master tables.
//!
//! Sales reaching this stage have already passed referential validation, so
//! both lookups are effectively total. A miss here means the validator's
//! invariant was broken upstream. That is an internal bug, raised loudly,
//! never papered over with a null.

use std::collections::HashMap;

use crate::domain::{Customer, MergedRecord, Product, SaleRecord};
use crate::error::PulseError;

/// Widen each sale with its customer and product attributes.
///
/// `line_revenue` is computed here, as part of the join, so no downstream
/// stage ever recomputes it from parts.
pub fn join_sales(
    sales: &[SaleRecord],
    customers: &[Customer],
    products: &[Product],
) -> Result<Vec<MergedRecord>, PulseError> {
    let by_customer: HashMap<&str, &Customer> =
        customers.iter().map(|c| (c.id.as_str(), c)).collect();
    let by_product: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut merged = Vec::with_capacity(sales.len());
    for sale in sales {
        let customer = by_customer.get(sale.customer_id.as_str()).ok_or_else(|| {
            PulseError::InternalConsistency(format!(
                "validated sale references unknown customer '{}'",
                sale.customer_id
            ))
        })?;
        let product = by_product.get(sale.product_id.as_str()).ok_or_else(|| {
            PulseError::InternalConsistency(format!(
                "validated sale references unknown product '{}'",
                sale.product_id
            ))
        })?;

        merged.push(MergedRecord {
            date: sale.date,
            customer_id: sale.customer_id.clone(),
            customer_name: customer.name.clone(),
            location: customer.location.clone(),
            product_id: sale.product_id.clone(),
            product_name: product.name.clone(),
            category: product.category.clone(),
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            line_revenue: sale.line_revenue(),
        });
    }

    Ok(merged)
}
