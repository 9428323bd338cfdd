//! Synthetic retail snapshot generation.
//!
//! Produces a deterministic `SourceTables` from a seed and shape parameters:
//! a small customer/product catalog and a run of dated sales with jittered
//! prices. A configurable number of deliberately dangling sales rows is
//! appended so the validator's drop path gets exercised end to end, the way
//! real upstream feeds misbehave.
//!
//! Determinism matters: identical `(seed, shape)` inputs must yield
//! identical tables, so demos and tests can pin expectations.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Customer, Product, SaleRecord, SourceTables};
use crate::error::PulseError;

const LOCATIONS: [&str; 8] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Seattle",
    "Denver",
    "Boston",
];

/// Category label and a typical unit price to jitter around.
const CATEGORIES: [(&str, f64); 5] = [
    ("Clothing", 45.0),
    ("Electronics", 220.0),
    ("Groceries", 12.0),
    ("Home & Garden", 60.0),
    ("Toys", 25.0),
];

/// Shape of the generated snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleShape {
    pub seed: u64,
    pub customers: usize,
    pub products: usize,
    /// Length of the sales window in days, starting at `start_date`.
    pub days: u32,
    pub start_date: NaiveDate,
    /// Sales rows generated per day of the window, on average. Rows pick a
    /// uniformly random day, so light days and gaps occur naturally.
    pub sales_per_day: usize,
    /// Extra rows referencing unknown customer/product ids.
    pub bad_reference_rows: usize,
}

impl Default for SampleShape {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 12,
            products: 10,
            days: 8,
            // Matches the window the original dashboard opened on.
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("static date is valid"),
            sales_per_day: 6,
            bad_reference_rows: 2,
        }
    }
}

/// Generate a deterministic snapshot from the shape.
pub fn generate_sample(shape: &SampleShape) -> Result<SourceTables, PulseError> {
    if shape.customers == 0 || shape.products == 0 {
        return Err(PulseError::InvalidArgument(
            "Sample needs at least one customer and one product.".to_string(),
        ));
    }
    if shape.days == 0 {
        return Err(PulseError::InvalidArgument(
            "Sample window must cover at least one day.".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(shape.seed);
    let price_jitter = Normal::new(1.0, 0.06).map_err(|e| {
        PulseError::InternalConsistency(format!("price jitter distribution: {e}"))
    })?;

    let customers: Vec<Customer> = (1..=shape.customers)
        .map(|i| Customer {
            id: format!("C-{i:03}"),
            name: format!("Customer {i:03}"),
            location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string(),
        })
        .collect();

    let products: Vec<Product> = (1..=shape.products)
        .map(|i| {
            let (category, base_price) = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let price = (base_price * price_jitter.sample(&mut rng)).max(1.0);
            Product {
                id: format!("P-{i:03}"),
                name: format!("{category} Item {i:03}"),
                category: category.to_string(),
                price: round_cents(price),
            }
        })
        .collect();

    let total_sales = shape.days as usize * shape.sales_per_day;
    let mut sales = Vec::with_capacity(total_sales + shape.bad_reference_rows);
    for _ in 0..total_sales {
        let day_offset = rng.gen_range(0..i64::from(shape.days));
        let product = &products[rng.gen_range(0..products.len())];
        let customer = &customers[rng.gen_range(0..customers.len())];
        // Sale price drifts around the catalog price, as in real feeds.
        let unit_price = (product.price * price_jitter.sample(&mut rng)).max(0.5);

        sales.push(SaleRecord {
            date: shape.start_date + Duration::days(day_offset),
            customer_id: customer.id.clone(),
            product_id: product.id.clone(),
            quantity: rng.gen_range(1..=8),
            unit_price: round_cents(unit_price),
        });
    }

    // Dangling references, alternating between the two failure kinds.
    for i in 0..shape.bad_reference_rows {
        let day_offset = rng.gen_range(0..i64::from(shape.days));
        let (customer_id, product_id) = if i % 2 == 0 {
            ("C-999".to_string(), products[0].id.clone())
        } else {
            (customers[0].id.clone(), "P-999".to_string())
        };
        sales.push(SaleRecord {
            date: shape.start_date + Duration::days(day_offset),
            customer_id,
            product_id,
            quantity: rng.gen_range(1..=8),
            unit_price: 19.99,
        });
    }

    Ok(SourceTables {
        customers,
        products,
        sales,
    })
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
