use chrono::NaiveDate;
use serde::Serialize;

/// One day's total cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPoint {
    pub date: NaiveDate,
    pub cost: f64,
}

/// One day's cost for a single instance type. Several points may share a
/// date, one per distinct type billed that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostByTypePoint {
    pub date: NaiveDate,
    pub instance_type: String,
    pub cost: f64,
}

/// Summary statistics over a daily cost series. Computed once per run,
/// never mutated afterwards.
///
/// An empty series is a defined state, not an error: all amounts are 0.0
/// and both dates are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_cost: f64,
    pub average_cost: f64,
    pub max_cost: f64,
    pub max_cost_date: Option<NaiveDate>,
    pub min_cost: f64,
    pub min_cost_date: Option<NaiveDate>,
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            total_cost: 0.0,
            average_cost: 0.0,
            max_cost: 0.0,
            max_cost_date: None,
            min_cost: 0.0,
            min_cost_date: None,
        }
    }
}

/// Where the daily total series came from. Resolved once at pipeline entry;
/// the rest of the run never re-checks file existence.
#[derive(Debug, Clone)]
pub enum DailySeries {
    /// Loaded from the daily-total export file. Used verbatim.
    Reported(Vec<CostPoint>),
    /// Summed from the per-type series because no total file was supplied.
    Derived(Vec<CostPoint>),
}

impl DailySeries {
    pub fn points(&self) -> &[CostPoint] {
        match self {
            DailySeries::Reported(p) | DailySeries::Derived(p) => p,
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            DailySeries::Reported(_) => "daily-total file",
            DailySeries::Derived(_) => "derived from per-type data",
        }
    }
}
