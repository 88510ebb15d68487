//! Normalizes Cost Explorer export JSON into flat cost tables.
//!
//! Two shapes come in: a daily-total series (`Total.UnblendedCost`) and a
//! per-instance-type series (`Groups[].Metrics.UnblendedCost`). Both carry
//! amounts as decimal strings, the way Cost Explorer emits them. A missing
//! field is surfaced as `MalformedInput` rather than skipped: it means the
//! upstream export format changed and a silently thinner report would be
//! worse than no report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ReportError;
use crate::types::{CostByTypePoint, CostPoint};

/// One `ResultsByTime` entry. `Total` is only present in the daily-total
/// export; `Groups` only in the per-type export (and may be empty there).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEntry {
    time_period: RawPeriod,
    total: Option<RawMetrics>,
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPeriod {
    start: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMetrics {
    unblended_cost: RawAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawAmount {
    amount: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawGroup {
    #[serde(default)]
    keys: Vec<String>,
    metrics: RawMetrics,
}

pub fn load_daily_total(path: &Path) -> Result<Vec<CostPoint>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_daily_total(path, &json)
}

pub fn load_by_type(path: &Path) -> Result<Vec<CostByTypePoint>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_by_type(path, &json)
}

/// Parse a daily-total series. N entries in, exactly N points out, sorted
/// ascending by date (stable, so equal dates keep input order).
pub fn parse_daily_total(path: &Path, json: &str) -> Result<Vec<CostPoint>> {
    let entries = parse_entries(path, json)?;

    let mut points = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let total = entry.total.ok_or_else(|| ReportError::MalformedInput {
            path: path.to_path_buf(),
            detail: format!("entry {idx}: missing Total.UnblendedCost"),
        })?;
        points.push(CostPoint {
            date: entry.time_period.start,
            cost: parse_amount(path, idx, &total.unblended_cost.amount)?,
        });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Parse a per-type series: one point per (period, group). An entry without
/// groups contributes nothing; a group without keys is labeled "UNKNOWN".
pub fn parse_by_type(path: &Path, json: &str) -> Result<Vec<CostByTypePoint>> {
    let entries = parse_entries(path, json)?;

    let mut points = Vec::new();
    for (idx, entry) in entries.into_iter().enumerate() {
        let date = entry.time_period.start;
        for group in entry.groups {
            let instance_type = group
                .keys
                .into_iter()
                .next()
                .unwrap_or_else(|| "UNKNOWN".to_string());
            points.push(CostByTypePoint {
                date,
                instance_type,
                cost: parse_amount(path, idx, &group.metrics.unblended_cost.amount)?,
            });
        }
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

fn parse_entries(path: &Path, json: &str) -> Result<Vec<RawEntry>> {
    serde_json::from_str(json).map_err(|e| {
        ReportError::MalformedInput {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
        .into()
    })
}

fn parse_amount(path: &Path, idx: usize, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        ReportError::MalformedInput {
            path: path.to_path_buf(),
            detail: format!("entry {idx}: non-numeric amount {raw:?}"),
        }
        .into()
    })
}
