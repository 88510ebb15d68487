//! Renders the two report charts as SVG documents.
//!
//! Charts are rendered into strings and handed to the report writer, which
//! owns the output directory layout and the atomic file writes. Rendering is
//! a pure function of the input table: same points, same SVG.
//!
//! An empty table yields `None` instead of a chart; the report shows a
//! "no data" placeholder in its place.

use anyhow::Result;
use chrono::Duration;
use plotters::prelude::*;

use crate::types::CostPoint;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const BAR_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Daily cost over time: chronological X, one marker per day, connected.
pub fn daily_line_svg(daily: &[CostPoint], size: (u32, u32)) -> Result<Option<String>> {
    if daily.is_empty() {
        return Ok(None);
    }

    // Normalizer output is date-ascending, so the range is just ends.
    let first = daily[0].date;
    let mut last = daily[daily.len() - 1].date;
    if last == first {
        // A one-day series still needs a non-degenerate axis.
        last = last + Duration::days(1);
    }
    let (y_min, y_max) = axis_bounds(daily.iter().map(|p| p.cost));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Daily EC2 Instance Cost", ("sans-serif", 24))
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(first..last, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Cost (USD)")
            .x_labels(daily.len().min(10))
            .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
            .y_label_formatter(&|v| format!("{v:.2}"))
            .draw()?;

        chart.draw_series(
            LineSeries::new(daily.iter().map(|p| (p.date, p.cost)), &LINE_COLOR)
                .point_size(3),
        )?;

        root.present()?;
    }

    Ok(Some(svg))
}

/// Total cost per instance type, bars sorted descending. The caller passes
/// totals already sorted (see `aggregate::type_totals`); this function only
/// draws them in the order given.
pub fn type_bars_svg(totals: &[(String, f64)], size: (u32, u32)) -> Result<Option<String>> {
    if totals.is_empty() {
        return Ok(None);
    }

    let n = totals.len() as i32;
    let (y_min, y_max) = axis_bounds(totals.iter().map(|(_, c)| *c));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("EC2 Cost per Instance Type", ("sans-serif", 24))
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Instance Type")
            .y_desc("Cost (USD)")
            .x_labels(totals.len())
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) => totals
                    .get(*i as usize)
                    .map(|(t, _)| truncate_label(t, 14))
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{v:.2}"))
            .draw()?;

        chart.draw_series(totals.iter().enumerate().map(|(i, (_, cost))| {
            let i = i as i32;
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *cost),
                ],
                BAR_COLOR.filled(),
            )
        }))?;

        root.present()?;
    }

    Ok(Some(svg))
}

/// Y axis range: anchored at zero, with a little headroom past the data on
/// either side. Negative amounts (billing credits) pull the lower bound
/// down so they stay inside the plot. An all-zero series still gets a
/// non-degenerate axis.
fn axis_bounds(costs: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for c in costs {
        lo = lo.min(c);
        hi = hi.max(c);
    }
    if lo == 0.0 && hi == 0.0 {
        return (0.0, 1.0);
    }
    (lo * 1.1, hi * 1.1)
}

/// Keep many-type X axes legible by shortening long labels.
fn truncate_label(s: &str, max: usize) -> String {
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
