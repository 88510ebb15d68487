use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::types::Summary;

fn format_cost(cost: f64) -> String {
    format!("{cost:.4} USD")
}

fn format_day(date: Option<chrono::NaiveDate>, cost: f64) -> String {
    match date {
        Some(d) => format!("{d} ({})", format_cost(cost)),
        None => "N/A".to_string(),
    }
}

pub fn print_table(summary: &Summary, source_label: &str, type_totals: &[(String, f64)]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header([Cell::new("Metric"), Cell::new("Value")]);

    table.add_row([Cell::new("Total cost"), Cell::new(format_cost(summary.total_cost))]);
    table.add_row([
        Cell::new("Average daily cost"),
        Cell::new(format_cost(summary.average_cost)),
    ]);
    table.add_row([
        Cell::new("Most expensive day"),
        Cell::new(format_day(summary.max_cost_date, summary.max_cost)),
    ]);
    table.add_row([
        Cell::new("Least expensive day"),
        Cell::new(format_day(summary.min_cost_date, summary.min_cost)),
    ]);
    table.add_row([Cell::new("Daily series"), Cell::new(source_label)]);

    println!("{table}");

    if type_totals.is_empty() {
        return;
    }

    let mut types = Table::new();
    types.load_preset(UTF8_FULL_CONDENSED);
    types.set_content_arrangement(ContentArrangement::Dynamic);
    types.set_header([Cell::new("Instance Type"), Cell::new("Total Cost")]);
    for (instance_type, cost) in type_totals {
        types.add_row([Cell::new(instance_type), Cell::new(format_cost(*cost))]);
    }

    println!("{types}");
}

pub fn print_json(summary: &Summary, source_label: &str, type_totals: &[(String, f64)]) {
    let types: Vec<serde_json::Value> = type_totals
        .iter()
        .map(|(instance_type, cost)| {
            serde_json::json!({
                "instance_type": instance_type,
                "total_cost": cost,
            })
        })
        .collect();

    let output = serde_json::json!({
        "summary": summary,
        "daily_series_source": source_label,
        "cost_per_instance_type": types,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).expect("JSON serialization failed")
    );
}
