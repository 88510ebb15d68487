//! Composes the static HTML report and owns all output-file writes.
//!
//! The document references its chart images by relative path, so the output
//! directory stays portable as a unit. Every artifact is written to a
//! sibling `.tmp` file and renamed into place: a reader either sees the
//! complete file or no file at all.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::types::Summary;

pub const LINE_CHART_REL: &str = "images/cost_over_time.svg";
pub const BAR_CHART_REL: &str = "images/cost_per_instance_type.svg";
pub const REPORT_FILE: &str = "ec2_cost_report.html";

/// Rendered chart documents. `None` means the source table was empty and
/// the report shows a placeholder instead of an image.
pub struct Charts {
    pub line: Option<String>,
    pub bars: Option<String>,
}

/// Write the report tree under `out_dir`: the images that exist, then the
/// HTML document. Returns the report path.
pub fn write_report_tree(
    out_dir: &Path,
    summary: &Summary,
    charts: &Charts,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let images_dir = out_dir.join("images");
    fs::create_dir_all(&images_dir)
        .with_context(|| format!("failed to create output dir {}", images_dir.display()))?;

    if let Some(svg) = &charts.line {
        atomic_write(&out_dir.join(LINE_CHART_REL), svg.as_bytes())?;
    }
    if let Some(svg) = &charts.bars {
        atomic_write(&out_dir.join(BAR_CHART_REL), svg.as_bytes())?;
    }

    let report_path = out_dir.join(REPORT_FILE);
    let html = render_html(summary, charts, generated_at);
    atomic_write(&report_path, html.as_bytes())?;

    Ok(report_path)
}

/// Render the document. Pure: the caller supplies the timestamp.
pub fn render_html(summary: &Summary, charts: &Charts, generated_at: DateTime<Utc>) -> String {
    let max_day = fmt_extremum(summary.max_cost_date, summary.max_cost);
    let min_day = fmt_extremum(summary.min_cost_date, summary.min_cost);

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>EC2 Cost Report</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 40px; }}
    table {{ border-collapse: collapse; }}
    th, td {{ border: 1px solid #ddd; padding: 8px; }}
    th {{ background: #f2f2f2; }}
    img {{ max-width: 100%; height: auto; }}
    .nodata {{ color: #888; font-style: italic; }}
  </style>
</head>
<body>
  <h1>EC2 Instance Cost Analysis</h1>

  <h2>Summary</h2>
  <table>
    <tr><th>Total Cost (USD)</th><td>{total:.4}</td></tr>
    <tr><th>Average Daily Cost (USD)</th><td>{avg:.4}</td></tr>
    <tr><th>Most Expensive Day</th><td>{max_day}</td></tr>
    <tr><th>Least Expensive Day</th><td>{min_day}</td></tr>
  </table>

  <h2>Chart: Daily Cost</h2>
  {line}

  <h2>Chart: Cost per Instance Type</h2>
  {bars}

  <p>Generated {generated} UTC</p>
</body>
</html>
"#,
        total = summary.total_cost,
        avg = summary.average_cost,
        max_day = max_day,
        min_day = min_day,
        line = img_or_placeholder(&charts.line, LINE_CHART_REL, "Daily cost"),
        bars = img_or_placeholder(&charts.bars, BAR_CHART_REL, "Cost per instance type"),
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn fmt_extremum(date: Option<NaiveDate>, cost: f64) -> String {
    match date {
        Some(d) => format!("{d} ({cost:.4} USD)"),
        None => "N/A".to_string(),
    }
}

fn img_or_placeholder(chart: &Option<String>, rel: &str, alt: &str) -> String {
    match chart {
        Some(_) => format!(r#"<img src="{rel}" alt="{alt}"/>"#),
        None => r#"<p class="nodata">No data available.</p>"#.to_string(),
    }
}

/// Write-then-rename so a crash mid-write never leaves a partial artifact
/// at the final path.
fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move {} into place", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_summary() -> Summary {
        Summary {
            total_cost: 4.7,
            average_cost: 2.35,
            max_cost: 3.5,
            max_cost_date: Some("2024-01-01".parse().unwrap()),
            min_cost: 1.2,
            min_cost_date: Some("2024-01-02".parse().unwrap()),
        }
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap()
    }

    fn temp_out_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("cereport-{tag}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn html_formats_costs_to_four_decimals() {
        let charts = Charts {
            line: Some("<svg/>".to_string()),
            bars: Some("<svg/>".to_string()),
        };
        let html = render_html(&sample_summary(), &charts, ts());
        assert!(html.contains("4.7000"));
        assert!(html.contains("2.3500"));
        assert!(html.contains("2024-01-01 (3.5000 USD)"));
        assert!(html.contains("2024-01-02 (1.2000 USD)"));
        assert!(html.contains("2024-02-01 12:30:00 UTC"));
        assert!(html.contains(r#"src="images/cost_over_time.svg""#));
        assert!(html.contains(r#"src="images/cost_per_instance_type.svg""#));
    }

    #[test]
    fn html_for_empty_dataset_shows_placeholders() {
        let charts = Charts { line: None, bars: None };
        let html = render_html(&Summary::empty(), &charts, ts());
        assert!(html.contains("0.0000"));
        assert!(html.contains("N/A"));
        assert!(html.contains("No data available."));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn write_report_tree_creates_all_artifacts() {
        let out = temp_out_dir("full");
        let charts = Charts {
            line: Some("<svg>line</svg>".to_string()),
            bars: Some("<svg>bars</svg>".to_string()),
        };
        let path = write_report_tree(&out, &sample_summary(), &charts, ts()).unwrap();

        assert_eq!(path, out.join(REPORT_FILE));
        assert!(path.exists());
        assert_eq!(
            fs::read_to_string(out.join(LINE_CHART_REL)).unwrap(),
            "<svg>line</svg>"
        );
        assert_eq!(
            fs::read_to_string(out.join(BAR_CHART_REL)).unwrap(),
            "<svg>bars</svg>"
        );
        // No leftover temp files.
        for entry in fs::read_dir(&out).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }

        fs::remove_dir_all(&out).unwrap();
    }

    #[test]
    fn write_report_tree_skips_absent_charts() {
        let out = temp_out_dir("sparse");
        let charts = Charts { line: None, bars: None };
        let path = write_report_tree(&out, &Summary::empty(), &charts, ts()).unwrap();

        assert!(path.exists());
        assert!(!out.join(LINE_CHART_REL).exists());
        assert!(!out.join(BAR_CHART_REL).exists());

        fs::remove_dir_all(&out).unwrap();
    }
}
