mod aggregate;
mod chart;
mod cli;
mod config;
mod error;
mod output;
mod report;
mod series;
mod types;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use cli::Cli;
use error::ReportError;
use types::DailySeries;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config();

    let grouped_name = config::resolve_name(
        cli.grouped_file.clone(),
        config.grouped_file.clone(),
        config::DEFAULT_GROUPED_FILE,
    );
    let total_name = config::resolve_name(
        cli.total_file.clone(),
        config.total_file.clone(),
        config::DEFAULT_TOTAL_FILE,
    );

    let grouped_path = locate_grouped(&cli.in_dir, &grouped_name)?;
    let by_type = series::load_by_type(&grouped_path)?;

    let total_path = cli.in_dir.join(total_name);
    if explicit_total_missing(cli.total_file.is_some(), &total_path) {
        eprintln!(
            "Warning: total file {} not found; deriving daily costs from per-type data.",
            total_path.display()
        );
    }
    let daily = resolve_daily(&total_path, &by_type)?;

    if !cli.quiet {
        eprintln!(
            "Loaded {} per-type cost points; daily series from {}.",
            by_type.len(),
            daily.source_label()
        );
    }

    let summary = aggregate::summarize(daily.points());
    let type_totals = aggregate::type_totals(&by_type);

    let size = config.chart_size();
    let charts = report::Charts {
        line: chart::daily_line_svg(daily.points(), size)?,
        bars: chart::type_bars_svg(&type_totals, size)?,
    };

    let report_path = report::write_report_tree(&cli.out_dir, &summary, &charts, Utc::now())?;

    match cli.format {
        cli::OutputFormat::Json => output::print_json(&summary, daily.source_label(), &type_totals),
        cli::OutputFormat::Table => {
            output::print_table(&summary, daily.source_label(), &type_totals)
        }
    }

    if !cli.quiet {
        eprintln!("Report written: {}", report_path.display());
    }

    Ok(())
}

/// The per-type export is the one input we cannot run without: its absence
/// ends the run with a message naming the missing path.
fn locate_grouped(in_dir: &std::path::Path, name: &str) -> Result<std::path::PathBuf> {
    let path = in_dir.join(name);
    if !path.exists() {
        return Err(ReportError::MissingRequiredInput(path).into());
    }
    Ok(path)
}

/// Silent fallback is fine when the default total-file name is simply not
/// there, but a file the user named on the command line deserves a warning
/// before we quietly derive sums instead.
fn explicit_total_missing(explicitly_named: bool, total_path: &std::path::Path) -> bool {
    explicitly_named && !total_path.exists()
}

/// Resolve the daily-series source once, up front. When the total export
/// exists its values are used verbatim; the derived sum is strictly a
/// fallback, never a cross-check. Downstream code only sees the resolved
/// series and never re-touches the filesystem.
fn resolve_daily(
    total_path: &std::path::Path,
    by_type: &[types::CostByTypePoint],
) -> Result<DailySeries> {
    if total_path.exists() {
        Ok(DailySeries::Reported(series::load_daily_total(total_path)?))
    } else {
        Ok(DailySeries::Derived(aggregate::derive_daily(by_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(tag: &str, contents: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "cereport-{tag}-{}-{nanos}.json",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reported_totals_used_verbatim_over_derived_sums() {
        // The total file says 9.99 even though per-type points sum to 3.5;
        // the reported value must win untouched.
        let path = temp_file(
            "total",
            r#"[{"TimePeriod":{"Start":"2024-01-01"},
                 "Total":{"UnblendedCost":{"Amount":"9.99"}}}]"#,
        );
        let by_type = vec![
            types::CostByTypePoint {
                date: "2024-01-01".parse().unwrap(),
                instance_type: "t2.micro".to_string(),
                cost: 1.0,
            },
            types::CostByTypePoint {
                date: "2024-01-01".parse().unwrap(),
                instance_type: "m5.large".to_string(),
                cost: 2.5,
            },
        ];

        let daily = resolve_daily(&path, &by_type).unwrap();
        assert!(matches!(daily, DailySeries::Reported(_)));
        assert_eq!(daily.points().len(), 1);
        assert_eq!(daily.points()[0].cost, 9.99);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_grouped_file_is_a_named_fatal_error() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let in_dir = std::env::temp_dir().join(format!(
            "cereport-empty-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&in_dir).unwrap();

        let err = locate_grouped(&in_dir, config::DEFAULT_GROUPED_FILE).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingRequiredInput(_))
        ));
        let expected = in_dir.join(config::DEFAULT_GROUPED_FILE);
        assert!(err.to_string().contains(&expected.display().to_string()));

        fs::remove_dir_all(&in_dir).unwrap();
    }

    #[test]
    fn locate_grouped_finds_existing_file() {
        let path = temp_file("grouped", "[]");
        let in_dir = path.parent().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();

        let located = locate_grouped(&in_dir, &name).unwrap();
        assert_eq!(located, path);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn only_an_explicitly_named_missing_total_warns() {
        let missing = std::env::temp_dir().join("cereport-no-such-total.json");
        assert!(explicit_total_missing(true, &missing));
        assert!(!explicit_total_missing(false, &missing));

        let present = temp_file("warn-total", "[]");
        assert!(!explicit_total_missing(true, &present));
        fs::remove_file(&present).unwrap();
    }

    #[test]
    fn missing_total_file_falls_back_to_derived() {
        let path = std::env::temp_dir().join("cereport-does-not-exist.json");
        let by_type = vec![types::CostByTypePoint {
            date: "2024-01-01".parse().unwrap(),
            instance_type: "t2.micro".to_string(),
            cost: 1.0,
        }];

        let daily = resolve_daily(&path, &by_type).unwrap();
        assert!(matches!(daily, DailySeries::Derived(_)));
        assert_eq!(daily.points()[0].cost, 1.0);
    }
}
