use std::collections::BTreeMap;

use crate::types::{CostByTypePoint, CostPoint, Summary};

/// Sum per-type costs into one point per date, ascending. Fallback path for
/// when no daily-total export was supplied; never used to cross-check a
/// supplied one.
pub fn derive_daily(by_type: &[CostByTypePoint]) -> Vec<CostPoint> {
    let mut buckets: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for p in by_type {
        *buckets.entry(p.date).or_insert(0.0) += p.cost;
    }

    buckets
        .into_iter()
        .map(|(date, cost)| CostPoint { date, cost })
        .collect()
}

/// Total cost per instance type, sorted descending by total. Ties keep
/// first-appearance order, which a stable sort gives us for free.
pub fn type_totals(by_type: &[CostByTypePoint]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for p in by_type {
        match totals.iter_mut().find(|(t, _)| t == &p.instance_type) {
            Some((_, cost)) => *cost += p.cost,
            None => totals.push((p.instance_type.clone(), p.cost)),
        }
    }

    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

/// Summary statistics over a daily series. Expects the date-ascending order
/// the normalizer guarantees; with strict comparisons below, the earliest
/// date wins when several days share the extremal cost.
pub fn summarize(daily: &[CostPoint]) -> Summary {
    if daily.is_empty() {
        return Summary::empty();
    }

    let mut total = 0.0;
    let mut max = &daily[0];
    let mut min = &daily[0];
    for p in daily {
        total += p.cost;
        if p.cost > max.cost {
            max = p;
        }
        if p.cost < min.cost {
            min = p;
        }
    }

    Summary {
        total_cost: total,
        average_cost: total / daily.len() as f64,
        max_cost: max.cost,
        max_cost_date: Some(max.date),
        min_cost: min.cost,
        min_cost_date: Some(min.date),
    }
}
