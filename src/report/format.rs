//! Formatted terminal output for a dashboard run.

use crate::domain::{FilterSpec, GridCell, PipelineOptions};
use crate::pipeline::DashboardData;

/// Format the full dashboard: metrics, validation summary, the four views,
/// and the daily trend grid.
pub fn format_dashboard(data: &DashboardData, options: &PipelineOptions) -> String {
    let mut out = String::new();

    out.push_str("=== pulse - Retail Sales Summary ===\n");
    out.push_str(&format!(
        "Last updated: {}\n",
        data.refreshed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Filter: {}\n", describe_filter(&options.filter)));
    out.push('\n');

    out.push_str(&format!(
        "Total revenue  : {}\n",
        fmt_money(data.totals.revenue)
    ));
    out.push_str(&format!("Total customers: {}\n", data.totals.customers));
    out.push_str(&format!("Total products : {}\n", data.totals.products));
    out.push('\n');

    out.push_str(&format!(
        "Sales rows: read={} used={}",
        data.rows_read, data.rows_used
    ));
    if data.drops.total() > 0 {
        out.push_str(&format!(
            " dropped={} (unknown customer={}, unknown product={}, bad price={})",
            data.drops.total(),
            data.drops.unknown_customer,
            data.drops.unknown_product,
            data.drops.bad_price
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "Categories: {}\n",
        data.category_options.join(", ")
    ));
    out.push('\n');

    out.push_str(&format!("Top {} locations by revenue:\n", options.top_locations));
    out.push_str(&format_locations(data));
    out.push('\n');

    out.push_str("Revenue by category:\n");
    out.push_str(&format_categories(data));
    out.push('\n');

    out.push_str("Customer purchase patterns:\n");
    out.push_str(&format_customers(data));
    out.push('\n');

    out.push_str("Daily sales by category:\n");
    out.push_str(&format_grid(&data.grid));

    out
}

fn describe_filter(filter: &FilterSpec) -> String {
    let from = filter
        .start_date
        .map_or("(open)".to_string(), |d| d.to_string());
    let to = filter
        .end_date
        .map_or("(open)".to_string(), |d| d.to_string());
    let categories = match &filter.categories {
        Some(set) if !set.is_empty() => set
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => "all".to_string(),
    };
    format!("{from} .. {to} | categories: {categories}")
}

fn format_locations(data: &DashboardData) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>10} {:>14}\n",
        "location", "quantity", "revenue"
    ));
    out.push_str(&format!("{:-<16} {:-<10} {:-<14}\n", "", "", ""));
    for row in &data.top_locations {
        out.push_str(&format!(
            "{:<16} {:>10} {:>14}\n",
            truncate(&row.location, 16),
            row.quantity,
            fmt_money(row.revenue)
        ));
    }
    out
}

fn format_categories(data: &DashboardData) -> String {
    let total = data.totals.revenue;
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>10} {:>14} {:>8}\n",
        "category", "quantity", "revenue", "share"
    ));
    out.push_str(&format!("{:-<16} {:-<10} {:-<14} {:-<8}\n", "", "", "", ""));
    for row in &data.category_distribution {
        let share = if total > 0.0 {
            row.revenue / total * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "{:<16} {:>10} {:>14} {:>7.1}%\n",
            truncate(&row.category, 16),
            row.quantity,
            fmt_money(row.revenue),
            share
        ));
    }
    out
}

fn format_customers(data: &DashboardData) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>10} {:>14} {:>14}\n",
        "customer", "quantity", "revenue", "avg/item"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<10} {:-<14} {:-<14}\n",
        "", "", "", ""
    ));
    for row in &data.customer_patterns {
        out.push_str(&format!(
            "{:<10} {:>10} {:>14} {:>14}\n",
            truncate(&row.customer_id, 10),
            row.quantity,
            fmt_money(row.revenue),
            fmt_money(row.avg_spend_per_item)
        ));
    }
    out
}

fn format_grid(grid: &[GridCell]) -> String {
    if grid.is_empty() {
        return "(no sales in range)\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<16} {:>10} {:>14}\n",
        "date", "category", "quantity", "revenue"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<16} {:-<10} {:-<14}\n",
        "", "", "", ""
    ));
    for cell in grid {
        out.push_str(&format!(
            "{:<12} {:<16} {:>10} {:>14}\n",
            cell.date.to_string(),
            truncate(&cell.category, 16),
            cell.quantity,
            fmt_money(cell.revenue)
        ));
    }
    out
}

/// `1234567.891` -> `$1,234,567.89`
fn fmt_money(v: f64) -> String {
    let negative = v < 0.0;
    let cents = format!("{:.2}", v.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
