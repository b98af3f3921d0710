use crate::models::{normalize_crop_name, CropMarginRow, Expense, Field, MarginSummary, Sale};
use std::collections::HashMap;

/// Crop bucket for records without a crop name.
const UNKNOWN_CROP: &str = "unknown";

/// Safe numeric accessor: missing or NaN values count as zero.
pub fn safe(n: Option<f64>) -> f64 {
    match n {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn per_ha(total: f64, area_ha: f64) -> f64 {
    if area_ha > 0.0 {
        total / area_ha
    } else {
        0.0
    }
}

#[derive(Default)]
struct CropTotals {
    expenses: f64,
    revenue: f64,
}

fn bucket_key(crop: &Option<String>) -> String {
    match crop.as_deref().map(normalize_crop_name) {
        Some(key) if !key.is_empty() => key,
        _ => UNKNOWN_CROP.to_string(),
    }
}

/// Aggregate fields, expenses and sales into farm-wide and per-crop
/// cost/revenue/margin figures.
///
/// Per-crop rows share the farm's total hectares as denominator because
/// crop-level area is not tracked; this is a documented approximation.
/// Rows come back sorted descending by margin/ha; ties keep first-seen
/// order (expense crops before sale-only crops).
pub fn aggregate(fields: &[Field], expenses: &[Expense], sales: &[Sale]) -> MarginSummary {
    let total_ha: f64 = fields.iter().map(|f| safe(Some(f.area_ha))).sum();
    let total_expenses: f64 = expenses.iter().map(|e| safe(Some(e.amount))).sum();
    let total_revenue: f64 = sales.iter().map(|s| s.revenue()).sum();

    let cost_per_ha = per_ha(total_expenses, total_ha);
    let revenue_per_ha = per_ha(total_revenue, total_ha);
    let margin_per_ha = revenue_per_ha - cost_per_ha;

    // Group by normalized crop name, remembering first-seen order so
    // the later sort can break ties deterministically.
    let mut totals: HashMap<String, CropTotals> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for expense in expenses {
        let key = bucket_key(&expense.crop_name);
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            CropTotals::default()
        });
        entry.expenses += safe(Some(expense.amount));
    }
    for sale in sales {
        let key = bucket_key(&sale.crop_name);
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            CropTotals::default()
        });
        entry.revenue += sale.revenue();
    }

    let mut by_crop: Vec<CropMarginRow> = order
        .into_iter()
        .map(|crop| {
            let t = &totals[&crop];
            let cost_per_ha = per_ha(t.expenses, total_ha);
            let revenue_per_ha = per_ha(t.revenue, total_ha);
            CropMarginRow {
                crop,
                expenses: t.expenses,
                revenue: t.revenue,
                cost_per_ha,
                revenue_per_ha,
                margin_per_ha: revenue_per_ha - cost_per_ha,
            }
        })
        .collect();

    // Vec::sort_by is stable, so equal margins keep encounter order
    by_crop.sort_by(|a, b| {
        b.margin_per_ha
            .partial_cmp(&a.margin_per_ha)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    MarginSummary {
        total_ha,
        total_expenses,
        total_revenue,
        cost_per_ha,
        revenue_per_ha,
        margin_per_ha,
        by_crop,
    }
}
