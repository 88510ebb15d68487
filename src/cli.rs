use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "cereport",
    about = "Generate charts and an HTML report from AWS Cost Explorer exports"
)]
pub struct Cli {
    /// Directory containing the Cost Explorer JSON exports
    #[arg(long, default_value = ".")]
    pub in_dir: PathBuf,

    /// Directory the report and chart images are written to
    #[arg(long, default_value = "output")]
    pub out_dir: PathBuf,

    /// File name of the daily-total export (optional input)
    #[arg(long)]
    pub total_file: Option<String>,

    /// File name of the per-instance-type export (required input)
    #[arg(long)]
    pub grouped_file: Option<String>,

    /// Terminal output format: table (default), json
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Suppress progress output (for scripting)
    #[arg(long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}
